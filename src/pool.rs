//! Interactive shallow-pool mode: ripple automaton driving a surface mesh.

use glam::Vec2;
use log::debug;

use crate::caustics::CausticsAccumulator;
use crate::error::Result;
use crate::ocean::SurfaceMesh;
use crate::params::{CausticsParams, RippleParams};
use crate::ripples::RippleAutomaton;
use crate::sink::FrameSink;
use crate::surface::Surface;

/// Pool surface with optional caustics
pub struct PoolSystem {
    surface: Surface<RippleAutomaton>,
}

impl PoolSystem {
    /// Without caustics parameters the pool runs unlit.
    pub fn new(params: RippleParams, caustics: Option<CausticsParams>) -> Result<Self> {
        let mesh = SurfaceMesh::new(params.dimension, params.grid_spacing_m)?;
        let lit = caustics.is_some();
        let caustics = CausticsAccumulator::new(caustics.unwrap_or_else(|| CausticsParams {
            tile_size: params.dimension,
            ..Default::default()
        }))?;
        let ripples = RippleAutomaton::new(params)?;

        let mut surface = Surface::new(ripples, mesh, caustics)?;
        surface.caustics_enabled = lit;
        Ok(Self { surface })
    }

    pub fn ripples(&self) -> &RippleAutomaton {
        self.surface.source()
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        self.surface.mesh()
    }

    pub fn caustics(&self) -> Option<&CausticsAccumulator> {
        self.surface
            .caustics_enabled
            .then(|| self.surface.caustics())
    }

    pub fn time_s(&self) -> f32 {
        self.surface.time_s()
    }

    /// Pause or resume the automaton.
    pub fn set_updates_enabled(&mut self, enabled: bool) {
        self.surface.updates_enabled = enabled;
    }

    /// Drop a pebble at a normalized pool position.
    pub fn tap(&mut self, position: Vec2) {
        self.ripples_mut().tap(position);
    }

    /// Calm the whole pool.
    pub fn flood(&mut self) {
        self.ripples_mut().flood();
        self.surface.reset_mesh();
    }

    fn ripples_mut(&mut self) -> &mut RippleAutomaton {
        self.surface.source_mut()
    }

    /// One automaton step per tick with a positive `dt_s`.
    pub fn tick(&mut self, dt_s: f32) -> Result<()> {
        if self.surface.tick(dt_s)? {
            debug!(
                "Pool tick: step {}, energy {:.4}",
                self.ripples().steps(),
                self.ripples().energy()
            );
        }
        Ok(())
    }

    pub fn present(&mut self, sink: &mut impl FrameSink) {
        self.surface.present(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(with_caustics: bool) -> PoolSystem {
        let params = RippleParams {
            dimension: 32,
            ..Default::default()
        };
        let caustics = with_caustics.then(|| CausticsParams {
            tile_size: 32,
            ocean_depth_m: 5.0,
            ..Default::default()
        });
        PoolSystem::new(params, caustics).unwrap()
    }

    #[test]
    fn test_tap_disturbs_surface() {
        let mut pool = pool(false);
        pool.tap(Vec2::new(0.5, 0.5));
        pool.tick(1.0 / 60.0).unwrap();
        assert!(pool.mesh().offset(16, 16).y > 0.0);
    }

    #[test]
    fn test_flood_calms_surface() {
        let mut pool = pool(false);
        pool.tap(Vec2::new(0.25, 0.75));
        for _ in 0..5 {
            pool.tick(0.1).unwrap();
        }
        pool.flood();
        assert_eq!(pool.ripples().energy(), 0.0);
        assert!(pool.mesh().vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn test_zero_dt_does_not_step() {
        let mut pool = pool(false);
        pool.tick(0.0).unwrap();
        assert_eq!(pool.ripples().steps(), 0);
    }

    #[test]
    fn test_unlit_pool_has_no_caustics() {
        assert!(pool(false).caustics().is_none());
        assert!(pool(true).caustics().is_some());
    }

    #[test]
    fn test_mismatched_caustics_tile_rejected() {
        let params = RippleParams {
            dimension: 32,
            ..Default::default()
        };
        let caustics = CausticsParams {
            tile_size: 64,
            ..Default::default()
        };
        assert!(PoolSystem::new(params, Some(caustics)).is_err());
    }

    #[test]
    fn test_ripples_focus_light() {
        let mut pool = pool(true);
        pool.tap(Vec2::new(0.5, 0.5));
        for _ in 0..3 {
            pool.tick(0.1).unwrap();
        }
        let buffer = pool.caustics().unwrap().snapshot();
        assert!(buffer.as_slice().iter().all(|v| v.is_finite() && *v >= 0.0));
        assert!(buffer.std_dev() > 0.0);
    }
}
