//! A surface mesh driven by any [`Heightfield`], with caustics beneath it.
//!
//! Both the spectral ocean and the ripple pool run on this: the heightfield
//! writes the mesh, the caustics accumulator reads it, and the presentation
//! layer receives the result through a [`FrameSink`].

use log::info;

use crate::caustics::CausticsAccumulator;
use crate::error::{OceanError, Result};
use crate::heightfield::Heightfield;
use crate::ocean::SurfaceMesh;
use crate::sink::FrameSink;

/// Heightfield source, mesh and caustics kept at one resolution.
///
/// The source dimension, the mesh dimension and the caustics tile size always
/// agree, so a calm surface lights exactly one texel per photon.
pub struct Surface<H> {
    source: H,
    mesh: SurfaceMesh,
    caustics: CausticsAccumulator,
    time_s: f32,
    /// Advance time on `tick`
    pub updates_enabled: bool,
    /// Rebuild caustics after each surface update
    pub caustics_enabled: bool,
    indices_dirty: bool,
}

fn check_source<H: Heightfield + ?Sized>(source: &H, mesh: &SurfaceMesh) -> Result<()> {
    if source.dimension() != mesh.dimension() {
        return Err(OceanError::invalid(
            "heightfield",
            format!(
                "dimension {} does not match mesh dimension {}",
                source.dimension(),
                mesh.dimension()
            ),
        ));
    }
    Ok(())
}

impl<H: Heightfield> Surface<H> {
    /// Assemble a surface. The mesh is left flat until the first refresh.
    pub fn new(source: H, mesh: SurfaceMesh, caustics: CausticsAccumulator) -> Result<Self> {
        check_source(&source, &mesh)?;
        let tile_size = caustics.params().tile_size;
        if tile_size != mesh.dimension() {
            return Err(OceanError::invalid(
                "tile_size",
                format!(
                    "caustics tile {} does not match mesh dimension {}",
                    tile_size,
                    mesh.dimension()
                ),
            ));
        }

        Ok(Self {
            source,
            mesh,
            caustics,
            time_s: 0.0,
            updates_enabled: true,
            caustics_enabled: true,
            indices_dirty: true,
        })
    }

    pub fn source(&self) -> &H {
        &self.source
    }

    /// Mutable access to the source; its dimension must not change.
    pub fn source_mut(&mut self) -> &mut H {
        &mut self.source
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn caustics(&self) -> &CausticsAccumulator {
        &self.caustics
    }

    /// Caustics parameters other than the tile size may be changed freely.
    pub(crate) fn caustics_mut(&mut self) -> &mut CausticsAccumulator {
        &mut self.caustics
    }

    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    /// Advance time by `dt_s` and refresh. Returns whether anything happened:
    /// nothing does when `dt_s <= 0` or updates are disabled.
    pub fn tick(&mut self, dt_s: f32) -> Result<bool> {
        if !self.updates_enabled || !(dt_s > 0.0) {
            return Ok(false);
        }
        self.time_s += dt_s;
        self.refresh()?;
        Ok(true)
    }

    /// Let the source write the mesh at the current time, then relight it.
    pub fn refresh(&mut self) -> Result<()> {
        self.source.update(self.time_s, &mut self.mesh)?;
        self.refresh_caustics()
    }

    /// Rebuild caustics from the mesh as it stands.
    pub fn refresh_caustics(&mut self) -> Result<()> {
        if self.caustics_enabled {
            self.caustics.update(&self.mesh)?;
        }
        Ok(())
    }

    /// Swap in a new source, and optionally a new mesh, then refresh.
    ///
    /// A new mesh brings the caustics tile to its dimension. Nothing changes
    /// if the new source does not match the (new) mesh.
    pub fn replace(&mut self, source: H, mesh: Option<SurfaceMesh>) -> Result<()> {
        check_source(&source, mesh.as_ref().unwrap_or(&self.mesh))?;

        if let Some(mesh) = mesh {
            if mesh.dimension() != self.caustics.params().tile_size {
                self.caustics.set_tile_size(mesh.dimension())?;
                info!("Caustics tile resized to {}", mesh.dimension());
            }
            self.mesh = mesh;
            self.indices_dirty = true;
        }
        self.source = source;
        self.refresh()
    }

    /// Put the mesh back to rest without touching the source.
    pub fn reset_mesh(&mut self) {
        self.mesh.reset();
    }

    /// Hand the current frame to the presentation layer.
    ///
    /// Indices go out once per mesh; caustics only while they are enabled.
    pub fn present(&mut self, sink: &mut impl FrameSink) {
        if self.indices_dirty {
            sink.upload_indices(&self.mesh.indices);
            self.indices_dirty = false;
        }
        sink.upload_vertices(&self.mesh.vertices);
        if self.caustics_enabled {
            sink.upload_caustics(self.caustics.buffer());
        }
    }
}
