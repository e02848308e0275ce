//! Shallow pool ripple parameters.

use crate::error::{require_positive, require_power_of_two, OceanError, Result};

/// Ripple automaton parameters
#[derive(Debug, Clone)]
pub struct RippleParams {
    /// Cells per side (power of 2), matches the pool mesh dimension
    pub dimension: usize,

    /// Energy kept per step (0..1). 1.0 never settles.
    pub damping: f32,

    /// Height added at the centre of a tap (automaton units)
    pub tap_strength: f32,

    /// Tap radius (cells)
    pub tap_radius: f32,

    /// Automaton units to mesh height (meters per unit)
    pub height_scale: f32,

    /// Spacing between rest-state vertices (meters)
    pub grid_spacing_m: f32,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            dimension: 128,
            damping: 0.985,
            tap_strength: 4.0,
            tap_radius: 3.0,
            height_scale: 1.0 / 64.0, // The readback scheme divides by 64
            grid_spacing_m: 1.0,
        }
    }
}

impl RippleParams {
    pub fn validate(&self) -> Result<()> {
        require_power_of_two("dimension", self.dimension)?;
        if self.dimension < 4 {
            return Err(OceanError::invalid(
                "dimension",
                format!("ripples need at least 4 cells per side, got {}", self.dimension),
            ));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(OceanError::invalid(
                "damping",
                format!("must lie in (0, 1], got {}", self.damping),
            ));
        }
        if !self.tap_strength.is_finite() {
            return Err(OceanError::invalid("tap_strength", "must be finite"));
        }
        require_positive("tap_radius", self.tap_radius)?;
        require_positive("height_scale", self.height_scale)?;
        require_positive("grid_spacing_m", self.grid_spacing_m)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RippleParams::default().validate().is_ok());
    }

    #[test]
    fn test_damping_range() {
        for damping in [0.0, -0.5, 1.5, f32::NAN] {
            let params = RippleParams {
                damping,
                ..Default::default()
            };
            assert!(params.validate().is_err(), "damping {} accepted", damping);
        }
    }
}
