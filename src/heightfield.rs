//! Common interface for anything that displaces a surface mesh.

use crate::error::Result;
use crate::ocean::SurfaceMesh;

/// A heightfield generator that writes vertex displacement into a mesh.
///
/// The spectral ocean and the ripple automaton both implement this, so a
/// surface can be driven by either one.
pub trait Heightfield {
    /// Cells per side; must match the mesh dimension.
    fn dimension(&self) -> usize;

    /// Advance to `time_s` and write positions and normals into `mesh`.
    fn update(&mut self, time_s: f32, mesh: &mut SurfaceMesh) -> Result<()>;
}

impl<H: Heightfield + ?Sized> Heightfield for Box<H> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn update(&mut self, time_s: f32, mesh: &mut SurfaceMesh) -> Result<()> {
        (**self).update(time_s, mesh)
    }
}
