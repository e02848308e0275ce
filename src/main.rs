//! Caustic Sea - headless FFT ocean and caustics generator
//!
//! Runs the simulation for a fixed number of ticks and writes caustics and
//! height images plus raw vertex dumps for each exported frame.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use glam::Vec2;
use image::{GrayImage, Luma};
use log::{error, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use caustic_sea::cli::{Args, Mode};
use caustic_sea::params::ExportConfig;
use caustic_sea::{FrameSink, IntensityBuffer, OceanSystem, PoolSystem, Vertex};

/// Writes each presented frame to disk
struct PngSink {
    config: ExportConfig,
    frame: usize,
    written: usize,
}

impl PngSink {
    fn new(config: ExportConfig) -> Self {
        Self {
            config,
            frame: 0,
            written: 0,
        }
    }

    fn write_bytes(&self, path: PathBuf, bytes: &[u8]) {
        if let Err(e) = std::fs::write(&path, bytes) {
            error!("Failed to write {}: {}", path.display(), e);
        }
    }
}

/// Grayscale height image of the vertex grid, normalized to its own range
fn height_image(vertices: &[Vertex]) -> GrayImage {
    let side = (vertices.len() as f64).sqrt() as u32;
    let (lo, hi) = vertices
        .iter()
        .map(|v| v.position[1])
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    let range = hi - lo;

    GrayImage::from_fn(side, side, |x, y| {
        let height = vertices[(y * side + x) as usize].position[1];
        let gray = if range > 0.0 {
            ((height - lo) / range * 255.0).clamp(0.0, 255.0) as u8
        } else {
            128
        };
        Luma([gray])
    })
}

impl FrameSink for PngSink {
    fn upload_vertices(&mut self, vertices: &[Vertex]) {
        let path = self.config.height_path(self.frame);
        if let Err(e) = height_image(vertices).save(&path) {
            error!("Failed to save height frame {}: {}", self.frame, e);
        }
        self.write_bytes(
            self.config.vertices_path(self.frame),
            bytemuck::cast_slice(vertices),
        );
        self.written += 1;
    }

    fn upload_indices(&mut self, indices: &[u32]) {
        self.write_bytes(
            self.config.output_dir.join("indices.bin"),
            bytemuck::cast_slice(indices),
        );
    }

    fn upload_caustics(&mut self, caustics: &IntensityBuffer) {
        let path = self.config.caustics_path(self.frame);
        if let Err(e) = caustics.to_luma_image().save(&path) {
            error!("Failed to save caustics frame {}: {}", self.frame, e);
        }
    }
}

fn run_ocean(args: &Args, sink: &mut PngSink) -> Result<(), Box<dyn std::error::Error>> {
    let mut ocean = OceanSystem::new(args.ocean_params(), args.caustics_params())?;
    let config = sink.config.clone();

    for frame in 0..config.frames {
        ocean.tick(config.dt_s)?;
        if config.should_export(frame) {
            sink.frame = frame;
            ocean.present(sink);
        }
    }

    let caustics = ocean.intensity();
    info!(
        "Ocean finished at t={:.2}s: caustics mean {:.3}, max {:.3}",
        ocean.time_s(),
        caustics.mean(),
        caustics.max()
    );
    Ok(())
}

fn run_pool(args: &Args, sink: &mut PngSink) -> Result<(), Box<dyn std::error::Error>> {
    let mut pool = PoolSystem::new(args.ripple_params(), Some(args.caustics_params()))?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let config = sink.config.clone();
    let tap_every = args.tap_every.max(1);

    for frame in 0..config.frames {
        if frame % tap_every == 0 {
            let position = Vec2::new(rng.gen_range(0.1..0.9), rng.gen_range(0.1..0.9));
            info!("Tap at {}", position);
            pool.tap(position);
        }
        pool.tick(config.dt_s)?;
        if config.should_export(frame) {
            sink.frame = frame;
            pool.present(sink);
        }
    }

    info!(
        "Pool finished after {} steps, energy {:.4}",
        pool.ripples().steps(),
        pool.ripples().energy()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.export_config();
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir)?;

    info!(
        "Simulating {} frames ({:.2}s) into {}",
        config.frames,
        config.duration_s(),
        config.output_dir.display()
    );

    let start = Instant::now();
    let mut sink = PngSink::new(config);

    match args.parse_mode() {
        Mode::Ocean => run_ocean(&args, &mut sink)?,
        Mode::Pool => run_pool(&args, &mut sink)?,
    }

    info!(
        "Wrote {} frames in {:.2}s",
        sink.written,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
