//! Error type shared by every constructor in the crate.

use thiserror::Error;

/// Errors raised while building spectrum tables, grids or simulations.
///
/// Parameter errors are deterministic in their inputs and surface at
/// construction or in a setter. Allocation failures may also come from a
/// tick, since every evaluation reserves fresh field grids.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OceanError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("failed to allocate {what} ({cells} cells)")]
    AllocationFailure { what: &'static str, cells: usize },
}

impl OceanError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OceanError>;

/// Reject values that are not strictly positive and finite.
pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OceanError::invalid(
            name,
            format!("must be finite and > 0, got {}", value),
        ));
    }
    Ok(())
}

/// Reject dimensions that are not a non-zero power of two.
pub(crate) fn require_power_of_two(name: &'static str, value: usize) -> Result<()> {
    if !value.is_power_of_two() {
        return Err(OceanError::invalid(
            name,
            format!("must be a power of 2, got {}", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_of_two_check() {
        assert!(require_power_of_two("dimension", 64).is_ok());
        assert!(require_power_of_two("dimension", 1).is_ok());
        assert!(require_power_of_two("dimension", 0).is_err());
        assert!(require_power_of_two("dimension", 48).is_err());
    }

    #[test]
    fn test_positive_check() {
        assert!(require_positive("length", 1.0).is_ok());
        assert!(require_positive("length", 0.0).is_err());
        assert!(require_positive("length", -3.0).is_err());
        assert!(require_positive("length", f32::NAN).is_err());
        assert!(require_positive("length", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = require_power_of_two("dimension", 12).unwrap_err();
        assert!(err.to_string().contains("dimension"));
        assert!(err.to_string().contains("12"));
    }
}
