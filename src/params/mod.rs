//! Parameter definitions with physical units and documented semantics.
//!
//! All tunables are collected here with:
//! - Physical units (meters, seconds, texels, etc.)
//! - Documented ranges and meanings
//! - A `validate()` that fails fast before anything is allocated

mod caustics;
mod export;
mod ocean;
mod ripple;

// Re-export all types
pub use caustics::{CausticsParams, CausticsStrategy, LightSource, WATER_IOR};
pub use export::ExportConfig;
pub use ocean::{OceanParams, GRAVITY_M_PER_S2};
pub use ripple::RippleParams;
