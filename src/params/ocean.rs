//! Ocean spectrum parameters.

use glam::Vec2;

use crate::error::{require_positive, require_power_of_two, OceanError, Result};
use crate::fft::FftConvention;

/// Acceleration due to gravity (m/s²)
pub const GRAVITY_M_PER_S2: f32 = 9.81;

/// Parameters of the Phillips-spectrum ocean.
///
/// Changing any of `amplitude`, `wind`, `length_m` or `period_s` means the
/// initial spectrum must be rebuilt; see `OceanSystem` setters.
#[derive(Debug, Clone)]
pub struct OceanParams {
    /// Frequency grid resolution N (must be power of 2). The vertex grid is N+1 per side.
    pub dimension: usize,

    /// Phillips spectrum amplitude A (dimensionless, >= 0; 0 gives a flat sea)
    pub amplitude: f32,

    /// Wind velocity in the XZ plane (m/s). Zero wind gives a flat sea.
    pub wind: Vec2,

    /// Patch length L (meters), the world size one FFT tile represents
    pub length_m: f32,

    /// Repeat period of the animation (seconds), quantizes the dispersion relation
    pub period_s: f32,

    /// Directional exponent p in |k̂·ŵ|^p. 2 is the classic spectrum, 6 gives
    /// waves much more aligned with the wind.
    pub directional_exponent: u32,

    /// Gravitational acceleration (m/s²)
    pub gravity: f32,

    /// Transform direction used when leaving the frequency domain
    pub fft_convention: FftConvention,

    /// Seed for the Gaussian amplitude draw
    pub seed: u64,
}

impl Default for OceanParams {
    fn default() -> Self {
        Self {
            dimension: 64,
            amplitude: 0.0005,
            wind: Vec2::new(32.0, 32.0),
            length_m: 64.0,
            period_s: 200.0,
            directional_exponent: 6,
            gravity: GRAVITY_M_PER_S2,
            fft_convention: FftConvention::Inverse,
            seed: 42,
        }
    }
}

impl OceanParams {
    /// Validate configuration (dimension must be power of 2, lengths positive, etc.)
    pub fn validate(&self) -> Result<()> {
        require_power_of_two("dimension", self.dimension)?;
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(OceanError::invalid(
                "amplitude",
                format!("must be finite and >= 0, got {}", self.amplitude),
            ));
        }
        if !self.wind.is_finite() {
            return Err(OceanError::invalid(
                "wind",
                format!("must be finite, got {}", self.wind),
            ));
        }
        require_positive("length_m", self.length_m)?;
        require_positive("period_s", self.period_s)?;
        require_positive("gravity", self.gravity)?;
        if self.directional_exponent == 0 {
            return Err(OceanError::invalid(
                "directional_exponent",
                "must be >= 1",
            ));
        }
        Ok(())
    }

    /// Base angular frequency ω0 = 2π / period (rad/s)
    pub fn base_frequency(&self) -> f32 {
        2.0 * std::f32::consts::PI / self.period_s
    }

    /// Spacing between rest-state vertices, L / N (meters). One tile of the
    /// mesh therefore always spans exactly the patch the spectrum describes.
    pub fn grid_spacing_m(&self) -> f32 {
        self.length_m / self.dimension as f32
    }

    /// Largest wave arising from the wind, L_w = |w|² / g (meters)
    pub fn wind_wave_length(&self) -> f32 {
        self.wind.length_squared() / self.gravity
    }

    /// True when the spectrum is identically zero (no wind or no amplitude).
    pub fn is_degenerate(&self) -> bool {
        self.amplitude == 0.0 || self.wind.length_squared() == 0.0
    }
}
