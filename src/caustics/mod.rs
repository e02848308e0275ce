//! Caustics from the displaced surface.
//!
//! Every surface sample is traced as a photon through the water surface
//! onto the floor, and photon density is accumulated into a T×T intensity
//! buffer, either by splatting or by histogramming an encoded photon map.

mod buffer;
mod histogram;
mod photon;
mod splat;

pub use buffer::IntensityBuffer;
pub use histogram::{encode as encode_photon_map, reduce as reduce_photon_map};
pub use photon::{refract, schlick_transmittance, trace_photon, trace_surface, Photon};
pub use splat::SplatKernel;

use glam::Vec3;
use log::{debug, warn};

use crate::error::{OceanError, Result};
use crate::ocean::SurfaceMesh;
use crate::params::{CausticsParams, CausticsStrategy, LightSource};

/// Histogram bins beyond this cannot be told apart by byte coordinates
const MAX_EXACT_HISTOGRAM_BINS: usize = 256;

/// Owns the caustics intensity buffer and rebuilds it from a mesh each tick.
pub struct CausticsAccumulator {
    params: CausticsParams,
    kernel: SplatKernel,
    buffer: IntensityBuffer,
}

impl CausticsAccumulator {
    pub fn new(params: CausticsParams) -> Result<Self> {
        params.validate()?;
        warn_on_coarse_histogram(&params);

        let kernel = SplatKernel::new(params.splat_sigma(), params.splat_radius());
        let buffer = IntensityBuffer::zeros(params.tile_size);
        Ok(Self {
            params,
            kernel,
            buffer,
        })
    }

    pub fn params(&self) -> &CausticsParams {
        &self.params
    }

    /// Latest intensity buffer (cheap to clone, never mutated).
    pub fn snapshot(&self) -> IntensityBuffer {
        self.buffer.clone()
    }

    pub fn buffer(&self) -> &IntensityBuffer {
        &self.buffer
    }

    /// Clear and rebuild the intensity buffer from the current mesh.
    pub fn update(&mut self, mesh: &SurfaceMesh) -> Result<&IntensityBuffer> {
        let n = mesh.dimension();
        let size = self.params.tile_size;
        let samples = n
            .checked_mul(n)
            .filter(|&s| s > 0)
            .ok_or_else(|| OceanError::invalid("mesh", format!("unusable dimension {}", n)))?;

        let photons = photon::trace_surface(mesh, &self.params);
        let dropped = samples - photons.len();
        if dropped > 0 {
            debug!("{} of {} photons missed the floor", dropped, samples);
        }

        // Spread the total light over the tile so a flat surface reads
        // photon_intensity per texel.
        let weight = self.params.photon_intensity * (size * size) as f32 / samples as f32;

        let accum = match self.params.strategy {
            CausticsStrategy::Splat => splat::accumulate(&photons, size, weight, &mut self.kernel),
            CausticsStrategy::Histogram => {
                let map = histogram::encode(&photons, n, size);
                histogram::reduce(&map, size, weight)
            }
        };

        self.buffer = IntensityBuffer::from_vec(size, accum);
        Ok(&self.buffer)
    }

    /// Apply a parameter change, keeping the old parameters if it is invalid.
    fn reconfigure(&mut self, change: impl FnOnce(&mut CausticsParams)) -> Result<()> {
        let mut params = self.params.clone();
        change(&mut params);
        params.validate()?;
        warn_on_coarse_histogram(&params);

        if params.tile_size != self.params.tile_size {
            self.buffer = IntensityBuffer::zeros(params.tile_size);
        }
        self.kernel = SplatKernel::new(params.splat_sigma(), params.splat_radius());
        self.params = params;
        Ok(())
    }

    pub fn set_depth(&mut self, depth_m: f32) -> Result<()> {
        self.reconfigure(|p| p.ocean_depth_m = depth_m)
    }

    pub fn set_photon_intensity(&mut self, intensity: f32) -> Result<()> {
        self.reconfigure(|p| p.photon_intensity = intensity)
    }

    pub fn set_photon_scale(&mut self, scale: f32) -> Result<()> {
        self.reconfigure(|p| p.photon_scale = scale)
    }

    pub fn set_light(&mut self, light: LightSource) -> Result<()> {
        self.reconfigure(|p| p.light = light)
    }

    pub fn set_strategy(&mut self, strategy: CausticsStrategy) -> Result<()> {
        self.reconfigure(|p| p.strategy = strategy)
    }

    /// Resize the intensity buffer; the old contents are discarded.
    pub fn set_tile_size(&mut self, tile_size: usize) -> Result<()> {
        self.reconfigure(|p| p.tile_size = tile_size)
    }

    /// Light direction at the centre of the tile, for shading the floor.
    pub fn light_direction(&self, tile_length: f32) -> Vec3 {
        match self.params.light {
            LightSource::Directional(dir) => dir.normalize(),
            LightSource::Point(pos) => {
                let centre = Vec3::new(tile_length * 0.5, 0.0, tile_length * 0.5);
                (centre - pos).normalize()
            }
        }
    }
}

fn warn_on_coarse_histogram(params: &CausticsParams) {
    if params.strategy == CausticsStrategy::Histogram && params.tile_size > MAX_EXACT_HISTOGRAM_BINS
    {
        warn!(
            "Histogram caustics with {} bins exceed byte precision; only {} bins per axis are reachable",
            params.tile_size, MAX_EXACT_HISTOGRAM_BINS
        );
    }
}
