//! Caustic Sea library - FFT ocean surfaces and the caustics they cast
//!
//! The ocean is synthesized from a Phillips spectrum and brought to the
//! spatial domain with a 2D FFT every tick. The displaced surface is then
//! traced as photons onto the floor to build a caustics intensity buffer.
//! A ripple automaton can drive the same mesh for a shallow pool.

pub mod caustics;
pub mod cli;
pub mod error;
pub mod fft;
pub mod grid;
pub mod heightfield;
pub mod ocean;
pub mod params;
pub mod pool;
pub mod ripples;
pub mod sink;
pub mod surface;

pub use caustics::{CausticsAccumulator, IntensityBuffer};
pub use error::{OceanError, Result};
pub use heightfield::Heightfield;
pub use ocean::{HeightfieldSynthesizer, OceanSystem, SpectrumTable, SurfaceMesh, Vertex};
pub use pool::PoolSystem;
pub use ripples::RippleAutomaton;
pub use sink::FrameSink;
pub use surface::Surface;
