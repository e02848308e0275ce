//! Tessendorf ocean: spectrum, time synthesis and the tileable surface mesh.

mod mesh;
mod spectrum;
mod synth;
mod system;

pub use mesh::{checkerboard_sign, SurfaceMesh, Vertex};
pub use spectrum::{
    dispersion, phillips, wavevector, GaussianSource, SeededGaussian, SpectrumTable, K_EPSILON,
};
pub use synth::{FrequencyFields, HeightfieldSynthesizer, SpatialFields};
pub use system::OceanSystem;
