//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;
use log::{info, warn};

use crate::params::{CausticsParams, CausticsStrategy, ExportConfig, OceanParams, RippleParams};

/// Which surface the run simulates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Tessendorf ocean
    Ocean,

    /// Ripple pool with periodic taps
    Pool,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "caustic-sea")]
#[command(about = "Headless FFT ocean and caustics generator", long_about = None)]
pub struct Args {
    /// Surface to simulate: ocean (default), pool
    #[arg(long, value_name = "MODE", default_value = "ocean")]
    pub mode: String,

    /// Grid resolution N (power of 2)
    #[arg(long, default_value_t = 64)]
    pub dimension: usize,

    /// Phillips spectrum amplitude
    #[arg(long, default_value_t = 0.0005)]
    pub amplitude: f32,

    /// Wind velocity along X (m/s)
    #[arg(long, value_name = "M_PER_S", default_value_t = 32.0, allow_negative_numbers = true)]
    pub wind_x: f32,

    /// Wind velocity along Z (m/s)
    #[arg(long, value_name = "M_PER_S", default_value_t = 32.0, allow_negative_numbers = true)]
    pub wind_z: f32,

    /// Patch length (meters)
    #[arg(long, value_name = "METERS", default_value_t = 64.0)]
    pub length: f32,

    /// Animation repeat period (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 200.0)]
    pub period: f32,

    /// Directional exponent of the spectrum (2 or 6 are typical)
    #[arg(long, default_value_t = 6)]
    pub exponent: u32,

    /// Floor depth below the rest surface (meters)
    #[arg(long, value_name = "METERS", default_value_t = 30.0)]
    pub depth: f32,

    /// Light carried per photon
    #[arg(long, default_value_t = 2.0)]
    pub photon_intensity: f32,

    /// Photon footprint (texels)
    #[arg(long, default_value_t = 4.0)]
    pub photon_scale: f32,

    /// Caustics accumulation: splat (default), histogram
    #[arg(long, default_value = "splat")]
    pub strategy: String,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 120)]
    pub frames: usize,

    /// Time step per tick (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 1.0 / 30.0)]
    pub dt: f32,

    /// Write every n-th frame
    #[arg(long, default_value_t = 1)]
    pub every: usize,

    /// Pool mode: ticks between random taps
    #[arg(long, default_value_t = 30)]
    pub tap_every: usize,

    /// Seed for the spectrum and the pool taps
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output directory for images and vertex dumps
    #[arg(long, value_name = "DIR", default_value = "frames")]
    pub output: PathBuf,
}

impl Args {
    /// Parse simulation mode from command-line arguments
    pub fn parse_mode(&self) -> Mode {
        match self.mode.to_lowercase().as_str() {
            "ocean" => {
                info!("Mode: Ocean ({}x{} spectrum)", self.dimension, self.dimension);
                Mode::Ocean
            }
            "pool" => {
                info!("Mode: Pool (taps every {} ticks)", self.tap_every);
                Mode::Pool
            }
            other => {
                warn!("Unknown mode '{}', using ocean", other);
                Mode::Ocean
            }
        }
    }

    /// Parse caustics strategy from command-line arguments
    pub fn parse_strategy(&self) -> CausticsStrategy {
        match self.strategy.to_lowercase().as_str() {
            "splat" => CausticsStrategy::Splat,
            "histogram" => CausticsStrategy::Histogram,
            other => {
                warn!("Unknown caustics strategy '{}', using splat", other);
                CausticsStrategy::Splat
            }
        }
    }

    pub fn ocean_params(&self) -> OceanParams {
        OceanParams {
            dimension: self.dimension,
            amplitude: self.amplitude,
            wind: Vec2::new(self.wind_x, self.wind_z),
            length_m: self.length,
            period_s: self.period,
            directional_exponent: self.exponent,
            seed: self.seed,
            ..Default::default()
        }
    }

    /// Caustics texture matches the grid so a calm surface lights one texel per photon.
    pub fn caustics_params(&self) -> CausticsParams {
        CausticsParams {
            tile_size: self.dimension,
            photon_intensity: self.photon_intensity,
            photon_scale: self.photon_scale,
            ocean_depth_m: self.depth,
            strategy: self.parse_strategy(),
            ..Default::default()
        }
    }

    pub fn ripple_params(&self) -> RippleParams {
        RippleParams {
            dimension: self.dimension,
            ..Default::default()
        }
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            dt_s: self.dt,
            every: self.every,
            output_dir: self.output.clone(),
            ..ExportConfig::new(self.frames)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_scene() {
        let args = Args::parse_from(["caustic-sea"]);
        let params = args.ocean_params();
        assert_eq!(params.dimension, 64);
        assert_eq!(params.wind, Vec2::new(32.0, 32.0));
        assert_eq!(params.grid_spacing_m(), 1.0);
        assert_eq!(args.parse_mode(), Mode::Ocean);
        assert_eq!(args.caustics_params().tile_size, 64);
    }

    #[test]
    fn test_flags_parse() {
        let args = Args::parse_from([
            "caustic-sea",
            "--mode",
            "pool",
            "--dimension",
            "32",
            "--wind-x",
            "-5",
            "--strategy",
            "histogram",
            "--output",
            "out",
        ]);
        assert_eq!(args.parse_mode(), Mode::Pool);
        assert_eq!(args.parse_strategy(), CausticsStrategy::Histogram);
        assert_eq!(args.ocean_params().wind.x, -5.0);
        assert_eq!(args.ripple_params().dimension, 32);
        assert_eq!(args.export_config().output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_unknown_strategy_falls_back() {
        let args = Args::parse_from(["caustic-sea", "--strategy", "raytrace"]);
        assert_eq!(args.parse_strategy(), CausticsStrategy::Splat);
    }
}
