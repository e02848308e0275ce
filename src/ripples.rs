//! Shallow-pool ripples from a discretized 2D wave equation.
//!
//! Three buffers are used: A and B alternate as output, and C holds a copy of
//! the output buffer taken just before it is overwritten, so the state from
//! two steps back can be read while the same buffer is being written.
//!
//! ```text
//!  B --> step --+--> A --+--> step --+--> B --+--> step --> A ...
//!               |        |           |        |
//!     C = old A +        +  C = old B +        +
//! ```

use glam::Vec2;
use log::{debug, warn};

use crate::error::Result;
use crate::grid::Grid;
use crate::heightfield::Heightfield;
use crate::ocean::SurfaceMesh;
use crate::params::RippleParams;

/// Which buffer the next step writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferSelect {
    WriteToA,
    WriteToB,
}

impl BufferSelect {
    fn flipped(self) -> Self {
        match self {
            Self::WriteToA => Self::WriteToB,
            Self::WriteToB => Self::WriteToA,
        }
    }
}

/// Wave-equation cellular automaton with tap and flood events.
pub struct RippleAutomaton {
    params: RippleParams,
    a: Grid<f32>,
    b: Grid<f32>,
    c: Grid<f32>,
    select: BufferSelect,
    pending_tap: Option<Vec2>,
    steps: u64,
}

impl RippleAutomaton {
    pub fn new(params: RippleParams) -> Result<Self> {
        params.validate()?;
        let n = params.dimension;
        let a = Grid::try_new(n, n, 0.0, "ripple buffer A")?;
        let b = Grid::try_new(n, n, 0.0, "ripple buffer B")?;
        let c = Grid::try_new(n, n, 0.0, "ripple buffer C")?;

        Ok(Self {
            params,
            a,
            b,
            c,
            select: BufferSelect::WriteToA,
            pending_tap: None,
            steps: 0,
        })
    }

    pub fn params(&self) -> &RippleParams {
        &self.params
    }

    pub fn state(&self) -> BufferSelect {
        self.select
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// True while a tap is waiting for the next step.
    pub fn is_tapped(&self) -> bool {
        self.pending_tap.is_some()
    }

    /// Queue an impulse at `position` (normalized `[0, 1]²`, x along columns).
    ///
    /// The impulse is injected by the next [`step`](Self::step). Positions
    /// outside the pool are ignored.
    pub fn tap(&mut self, position: Vec2) {
        if !(0.0..=1.0).contains(&position.x) || !(0.0..=1.0).contains(&position.y) {
            warn!("Ignoring tap outside the pool at {}", position);
            return;
        }
        self.pending_tap = Some(position);
    }

    /// Reset every buffer to still water.
    pub fn flood(&mut self) {
        for grid in [&mut self.a, &mut self.b, &mut self.c] {
            grid.as_mut_slice().fill(0.0);
        }
        debug!("Pool flooded after {} steps", self.steps);
    }

    /// Most recently written buffer.
    pub fn current(&self) -> &Grid<f32> {
        match self.select {
            // Next write goes to A, so B was written last
            BufferSelect::WriteToA => &self.b,
            BufferSelect::WriteToB => &self.a,
        }
    }

    /// Snapshot buffer (state two steps back).
    pub fn snapshot(&self) -> &Grid<f32> {
        &self.c
    }

    /// Advance the automaton by one step.
    pub fn step(&mut self) {
        let n = self.params.dimension;
        let damping = self.params.damping;
        let tap = self.pending_tap.take();

        let (output, input) = match self.select {
            BufferSelect::WriteToA => (&mut self.a, &self.b),
            BufferSelect::WriteToB => (&mut self.b, &self.a),
        };
        let previous = &mut self.c;

        previous.as_mut_slice().copy_from_slice(output.as_slice());

        // Border cells stay at zero, reflecting waves back into the pool.
        for i in 1..n - 1 {
            for j in 1..n - 1 {
                let neighbours =
                    input[(i - 1, j)] + input[(i + 1, j)] + input[(i, j - 1)] + input[(i, j + 1)];
                output[(i, j)] = (neighbours * 0.5 - previous[(i, j)]) * damping;
            }
        }

        if let Some(position) = tap {
            inject_impulse(
                output,
                position,
                self.params.tap_strength,
                self.params.tap_radius,
            );
        }

        self.select = self.select.flipped();
        self.steps += 1;
    }

    /// Sum of squared heights of the current buffer.
    pub fn energy(&self) -> f32 {
        self.current().iter().map(|h| h * h).sum()
    }
}

/// Add a cone-shaped bump centred on a normalized position.
fn inject_impulse(grid: &mut Grid<f32>, position: Vec2, strength: f32, radius: f32) {
    let n = grid.rows() as isize;
    let centre_col = (position.x * n as f32) as isize;
    let centre_row = (position.y * n as f32) as isize;
    let reach = radius.ceil() as isize;

    for di in -reach..=reach {
        for dj in -reach..=reach {
            let (row, col) = (centre_row + di, centre_col + dj);
            // Keep the fixed border intact
            if row < 1 || col < 1 || row >= n - 1 || col >= n - 1 {
                continue;
            }
            let dist = ((di * di + dj * dj) as f32).sqrt();
            if dist <= radius {
                grid[(row as usize, col as usize)] += strength * (1.0 - dist / radius);
            }
        }
    }
}

impl Heightfield for RippleAutomaton {
    fn dimension(&self) -> usize {
        self.params.dimension
    }

    fn update(&mut self, _time_s: f32, mesh: &mut SurfaceMesh) -> Result<()> {
        self.step();
        mesh.apply_heights(self.current(), self.params.height_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(dimension: usize) -> RippleAutomaton {
        RippleAutomaton::new(RippleParams {
            dimension,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_states_alternate() {
        let mut ripples = pool(16);
        assert_eq!(ripples.state(), BufferSelect::WriteToA);
        ripples.step();
        assert_eq!(ripples.state(), BufferSelect::WriteToB);
        ripples.step();
        assert_eq!(ripples.state(), BufferSelect::WriteToA);
        assert_eq!(ripples.steps(), 2);
    }

    #[test]
    fn test_still_water_stays_still() {
        let mut ripples = pool(16);
        for _ in 0..10 {
            ripples.step();
        }
        assert_eq!(ripples.energy(), 0.0);
    }

    #[test]
    fn test_tap_is_consumed_by_next_step() {
        let mut ripples = pool(16);
        ripples.tap(Vec2::new(0.5, 0.5));
        assert!(ripples.is_tapped());

        ripples.step();
        assert!(!ripples.is_tapped());
        assert!(ripples.current()[(8, 8)] > 0.0);
        assert!(ripples.energy() > 0.0);
    }

    #[test]
    fn test_out_of_range_tap_ignored() {
        let mut ripples = pool(16);
        ripples.tap(Vec2::new(1.5, 0.5));
        assert!(!ripples.is_tapped());
    }

    #[test]
    fn test_ripples_spread_symmetrically() {
        let mut ripples = pool(32);
        ripples.tap(Vec2::new(0.5, 0.5));
        for _ in 0..4 {
            ripples.step();
        }

        let current = ripples.current();
        // One cell per step beyond the tap radius
        assert!(current[(16, 21)].abs() > 0.0);
        assert_eq!(current[(16, 23)], 0.0);
        for i in 0..32 {
            for j in 0..32 {
                assert!((current[(i, j)] - current[(j, i)]).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_border_stays_fixed() {
        let mut ripples = pool(16);
        ripples.tap(Vec2::new(0.1, 0.1));
        for _ in 0..20 {
            ripples.step();
        }
        let current = ripples.current();
        for k in 0..16 {
            assert_eq!(current[(0, k)], 0.0);
            assert_eq!(current[(15, k)], 0.0);
            assert_eq!(current[(k, 0)], 0.0);
            assert_eq!(current[(k, 15)], 0.0);
        }
    }

    #[test]
    fn test_damping_settles_pool() {
        let mut ripples = RippleAutomaton::new(RippleParams {
            dimension: 16,
            damping: 0.9,
            ..Default::default()
        })
        .unwrap();
        ripples.tap(Vec2::new(0.5, 0.5));
        ripples.step();
        let initial = ripples.energy();

        for _ in 0..400 {
            ripples.step();
        }
        assert!(ripples.energy() < initial * 1e-3);
    }

    #[test]
    fn test_flood_resets_buffers() {
        let mut ripples = pool(16);
        ripples.tap(Vec2::new(0.5, 0.5));
        ripples.step();
        ripples.step();
        ripples.flood();
        assert_eq!(ripples.energy(), 0.0);
        assert!(ripples.snapshot().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_update_writes_mesh() {
        let mut ripples = pool(16);
        let mut mesh = SurfaceMesh::new(16, 1.0).unwrap();
        ripples.tap(Vec2::new(0.5, 0.5));
        ripples.update(0.0, &mut mesh).unwrap();

        let expected = ripples.current()[(8, 8)] * ripples.params().height_scale;
        assert_eq!(mesh.offset(8, 8).y, expected);
        assert!(expected > 0.0);
    }
}
