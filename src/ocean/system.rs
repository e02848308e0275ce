//! High-level ocean system: spectrum, surface mesh and caustics per tick.

use glam::Vec2;
use log::{debug, info};

use super::mesh::SurfaceMesh;
use super::spectrum::SpectrumTable;
use super::synth::HeightfieldSynthesizer;
use crate::caustics::{CausticsAccumulator, IntensityBuffer};
use crate::error::Result;
use crate::params::{CausticsParams, OceanParams};
use crate::sink::FrameSink;
use crate::surface::Surface;

/// Ocean simulation driven by the presentation layer's frame callback
pub struct OceanSystem {
    params: OceanParams,
    surface: Surface<HeightfieldSynthesizer>,
}

impl OceanSystem {
    /// Create new ocean system with specified parameters.
    ///
    /// The caustics tile must match `params.dimension`.
    pub fn new(params: OceanParams, caustics_params: CausticsParams) -> Result<Self> {
        let synth = HeightfieldSynthesizer::new(SpectrumTable::from_seed(&params)?);
        let mesh = SurfaceMesh::new(params.dimension, params.grid_spacing_m())?;
        let caustics = CausticsAccumulator::new(caustics_params)?;

        let mut surface = Surface::new(synth, mesh, caustics)?;
        surface.refresh()?;
        Ok(Self { params, surface })
    }

    pub fn params(&self) -> &OceanParams {
        &self.params
    }

    pub fn time_s(&self) -> f32 {
        self.surface.time_s()
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        self.surface.mesh()
    }

    pub fn synthesizer(&self) -> &HeightfieldSynthesizer {
        self.surface.source()
    }

    pub fn caustics(&self) -> &CausticsAccumulator {
        self.surface.caustics()
    }

    /// Latest caustics snapshot
    pub fn intensity(&self) -> IntensityBuffer {
        self.surface.caustics().snapshot()
    }

    /// Pause or resume time on `tick`.
    pub fn set_updates_enabled(&mut self, enabled: bool) {
        self.surface.updates_enabled = enabled;
    }

    /// Skip caustics rebuilding; the last buffer is kept.
    pub fn set_caustics_enabled(&mut self, enabled: bool) {
        self.surface.caustics_enabled = enabled;
    }

    /// Advance time by `dt_s` and update the surface and caustics.
    ///
    /// Does nothing when `dt_s <= 0` or updates are disabled.
    pub fn tick(&mut self, dt_s: f32) -> Result<()> {
        if self.surface.tick(dt_s)? {
            debug!("Ocean tick: t={:.3}s", self.surface.time_s());
        }
        Ok(())
    }

    /// Hand the current frame to the presentation layer.
    pub fn present(&mut self, sink: &mut impl FrameSink) {
        self.surface.present(sink);
    }

    /// Build a new spectrum table from modified parameters.
    ///
    /// A new mesh (and caustics tile) is built when the dimension or patch
    /// length changes. Everything stays in place if the new parameters are
    /// rejected.
    fn rebuild(&mut self, change: impl FnOnce(&mut OceanParams)) -> Result<()> {
        let mut params = self.params.clone();
        change(&mut params);
        let synth = HeightfieldSynthesizer::new(SpectrumTable::from_seed(&params)?);

        let mesh = if params.dimension != self.params.dimension
            || params.length_m != self.params.length_m
        {
            Some(SurfaceMesh::new(params.dimension, params.grid_spacing_m())?)
        } else {
            None
        };

        self.surface.replace(synth, mesh)?;
        info!("Ocean spectrum rebuilt at t={:.3}s", self.surface.time_s());
        self.params = params;
        Ok(())
    }

    pub fn set_wind(&mut self, wind: Vec2) -> Result<()> {
        self.rebuild(|p| p.wind = wind)
    }

    pub fn set_amplitude(&mut self, amplitude: f32) -> Result<()> {
        self.rebuild(|p| p.amplitude = amplitude)
    }

    /// Change the patch length; the mesh is rebuilt to span it.
    pub fn set_length(&mut self, length_m: f32) -> Result<()> {
        self.rebuild(|p| p.length_m = length_m)
    }

    pub fn set_period(&mut self, period_s: f32) -> Result<()> {
        self.rebuild(|p| p.period_s = period_s)
    }

    pub fn set_directional_exponent(&mut self, exponent: u32) -> Result<()> {
        self.rebuild(|p| p.directional_exponent = exponent)
    }

    /// Change the grid resolution; reallocates the mesh and caustics tile.
    pub fn set_dimension(&mut self, dimension: usize) -> Result<()> {
        self.rebuild(|p| p.dimension = dimension)
    }

    pub fn set_depth(&mut self, depth_m: f32) -> Result<()> {
        self.surface.caustics_mut().set_depth(depth_m)?;
        self.surface.refresh_caustics()
    }

    pub fn set_photon_intensity(&mut self, intensity: f32) -> Result<()> {
        self.surface.caustics_mut().set_photon_intensity(intensity)?;
        self.surface.refresh_caustics()
    }

    pub fn set_photon_scale(&mut self, scale: f32) -> Result<()> {
        self.surface.caustics_mut().set_photon_scale(scale)?;
        self.surface.refresh_caustics()
    }
}
