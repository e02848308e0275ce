//! Caustics accumulation parameters.

use glam::Vec3;

use crate::error::{require_positive, require_power_of_two, OceanError, Result};

/// Refractive index of water
pub const WATER_IOR: f32 = 1.333;

/// Where the light illuminating the surface comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSource {
    /// Parallel rays travelling along the given direction (need not be normalized)
    Directional(Vec3),

    /// Point light at a world position above the surface (meters)
    Point(Vec3),
}

impl Default for LightSource {
    fn default() -> Self {
        // Sun straight overhead
        Self::Directional(Vec3::NEG_Y)
    }
}

/// How photon density is turned into an intensity buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CausticsStrategy {
    /// Scatter-add a Gaussian splat per photon (no readback)
    #[default]
    Splat,

    /// Encode photons into an RGBA8 photon map and histogram it
    Histogram,
}

/// Caustics texture and photon parameters
#[derive(Debug, Clone)]
pub struct CausticsParams {
    /// Caustics texture resolution T (texels per side, power of 2).
    /// Matching the ocean dimension gives one photon per texel.
    pub tile_size: usize,

    /// Light carried by each photon (dimensionless). An undisturbed surface
    /// lights the floor at roughly this level.
    pub photon_intensity: f32,

    /// Photon footprint (texels). The splat is a Gaussian with σ = scale / 2.
    pub photon_scale: f32,

    /// Distance from the rest surface down to the floor (meters)
    pub ocean_depth_m: f32,

    /// Light illuminating the surface
    pub light: LightSource,

    /// Refractive index of the medium below the surface
    pub refractive_index: f32,

    /// Accumulation method
    pub strategy: CausticsStrategy,
}

impl Default for CausticsParams {
    fn default() -> Self {
        Self {
            tile_size: 64,
            photon_intensity: 2.0,
            photon_scale: 4.0,
            ocean_depth_m: 30.0,
            light: LightSource::default(),
            refractive_index: WATER_IOR,
            strategy: CausticsStrategy::Splat,
        }
    }
}

impl CausticsParams {
    pub fn validate(&self) -> Result<()> {
        require_power_of_two("tile_size", self.tile_size)?;
        if !self.photon_intensity.is_finite() || self.photon_intensity < 0.0 {
            return Err(OceanError::invalid(
                "photon_intensity",
                format!("must be finite and >= 0, got {}", self.photon_intensity),
            ));
        }
        require_positive("photon_scale", self.photon_scale)?;
        require_positive("ocean_depth_m", self.ocean_depth_m)?;
        require_positive("refractive_index", self.refractive_index)?;
        match self.light {
            LightSource::Directional(dir) => {
                if !dir.is_finite() || dir.y >= 0.0 {
                    return Err(OceanError::invalid(
                        "light",
                        format!("directional light must point downwards, got {}", dir),
                    ));
                }
            }
            LightSource::Point(pos) => {
                if !pos.is_finite() || pos.y <= 0.0 {
                    return Err(OceanError::invalid(
                        "light",
                        format!("point light must sit above the surface, got {}", pos),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Gaussian standard deviation of one photon splat (texels)
    pub fn splat_sigma(&self) -> f32 {
        self.photon_scale * 0.5
    }

    /// Splat footprint radius (texels), three standard deviations
    pub fn splat_radius(&self) -> i32 {
        (3.0 * self.splat_sigma()).ceil() as i32
    }
}
