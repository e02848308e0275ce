//! Boundary to the presentation layer.

use crate::caustics::IntensityBuffer;
use crate::ocean::Vertex;

/// Receives per-frame output once a tick has finished.
///
/// GPU buffers, textures and files all live on the other side of this trait;
/// the simulation only ever hands data across it.
pub trait FrameSink {
    /// Updated surface vertices, `(N+1)²` entries.
    fn upload_vertices(&mut self, vertices: &[Vertex]);

    /// Triangle indices. Only sent when the mesh topology changes.
    fn upload_indices(&mut self, indices: &[u32]);

    /// Latest caustics snapshot.
    fn upload_caustics(&mut self, caustics: &IntensityBuffer);
}
