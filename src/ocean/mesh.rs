//! Tileable surface mesh displaced by heightfield output.

use std::collections::TryReserveError;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::synth::SpatialFields;
use crate::error::{require_positive, require_power_of_two, OceanError, Result};
use crate::grid::Grid;

/// Vertex data for the surface mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// (−1)^(i+j), undoing the half-grid index shift of the transform.
#[inline]
pub fn checkerboard_sign(i: usize, j: usize) -> f32 {
    if (i + j) % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// (N+1)×(N+1) vertex grid. The extra row and column repeat row 0 and
/// column 0 so tiles placed edge to edge meet without cracks.
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Rest-state positions, never modified after construction
    rest: Vec<Vec3>,
    /// Displacement applied to each rest position by the last update
    offsets: Vec<Vec3>,
    dimension: usize,
    grid_spacing: f32,
}

impl SurfaceMesh {
    /// Create a flat mesh with `dimension` quads per side.
    pub fn new(dimension: usize, grid_spacing: f32) -> Result<Self> {
        require_power_of_two("dimension", dimension)?;
        require_positive("grid_spacing_m", grid_spacing)?;

        let side = dimension + 1;
        let vertex_count = side
            .checked_mul(side)
            .ok_or(OceanError::AllocationFailure {
                what: "surface vertices",
                cells: usize::MAX,
            })?;
        let index_count = dimension
            .checked_mul(dimension)
            .and_then(|quads| quads.checked_mul(6))
            .ok_or(OceanError::AllocationFailure {
                what: "surface indices",
                cells: usize::MAX,
            })?;
        if vertex_count > u32::MAX as usize {
            return Err(OceanError::AllocationFailure {
                what: "surface vertices (u32 indices)",
                cells: vertex_count,
            });
        }

        let vertex_failure = |_: TryReserveError| OceanError::AllocationFailure {
            what: "surface vertices",
            cells: vertex_count,
        };
        let mut vertices = Vec::new();
        vertices.try_reserve_exact(vertex_count).map_err(vertex_failure)?;
        let mut rest = Vec::new();
        rest.try_reserve_exact(vertex_count).map_err(vertex_failure)?;
        let mut offsets = Vec::new();
        offsets.try_reserve_exact(vertex_count).map_err(vertex_failure)?;

        let mut indices = Vec::new();
        indices
            .try_reserve_exact(index_count)
            .map_err(|_| OceanError::AllocationFailure {
                what: "surface indices",
                cells: index_count,
            })?;

        // Generate flat XZ plane grid, row i along Z and column j along X
        for i in 0..side {
            for j in 0..side {
                let position = Vec3::new(j as f32 * grid_spacing, 0.0, i as f32 * grid_spacing);
                rest.push(position);
                offsets.push(Vec3::ZERO);
                vertices.push(Vertex {
                    position: position.to_array(),
                    normal: [0.0, 1.0, 0.0],
                    uv: [j as f32 / dimension as f32, i as f32 / dimension as f32],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding)
        for i in 0..dimension {
            for j in 0..dimension {
                let top_left = (i * side + j) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((i + 1) * side + j) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Ok(Self {
            vertices,
            indices,
            rest,
            offsets,
            dimension,
            grid_spacing,
        })
    }

    /// Quads per side (N)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Vertices per side (N + 1)
    pub fn side(&self) -> usize {
        self.dimension + 1
    }

    pub fn grid_spacing(&self) -> f32 {
        self.grid_spacing
    }

    /// World size of one tile (meters)
    pub fn tile_length(&self) -> f32 {
        self.dimension as f32 * self.grid_spacing
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.side() + col
    }

    pub fn vertex(&self, row: usize, col: usize) -> &Vertex {
        &self.vertices[self.index(row, col)]
    }

    pub fn rest_position(&self, row: usize, col: usize) -> Vec3 {
        self.rest[self.index(row, col)]
    }

    /// Displacement from the rest position written by the last update
    pub fn offset(&self, row: usize, col: usize) -> Vec3 {
        self.offsets[self.index(row, col)]
    }

    /// Restore the flat rest state.
    pub fn reset(&mut self) {
        for ((vertex, rest), offset) in self
            .vertices
            .iter_mut()
            .zip(self.rest.iter())
            .zip(self.offsets.iter_mut())
        {
            vertex.position = rest.to_array();
            vertex.normal = [0.0, 1.0, 0.0];
            *offset = Vec3::ZERO;
        }
    }

    fn write(&mut self, idx: usize, offset: Vec3, normal: Vec3) {
        self.offsets[idx] = offset;
        let vertex = &mut self.vertices[idx];
        vertex.position = (self.rest[idx] + offset).to_array();
        vertex.normal = normal.to_array();
    }

    /// Apply spatial ocean fields to every vertex.
    ///
    /// Fields are sign-corrected by [`checkerboard_sign`], then
    /// `position = rest + (−Dx, h, −Dz)` and `normal = normalize(−∂x, 1, −∂z)`.
    /// Slopes and horizontal displacement additionally take the convention's
    /// [`derivative_sign`](crate::fft::FftConvention::derivative_sign), so they
    /// stay consistent with the height surface under either transform.
    /// Row N and column N read field row 0 and column 0, so the seam vertices
    /// carry exactly the same displacement as their opposite edge.
    pub fn apply_fields(&mut self, fields: &SpatialFields) -> Result<()> {
        let n = self.dimension;
        if fields.dimension() != n {
            return Err(OceanError::invalid(
                "fields",
                format!("dimension {} does not match mesh dimension {}", fields.dimension(), n),
            ));
        }

        let derivative = fields.convention.derivative_sign();
        let side = self.side();
        for row in 0..side {
            let fi = row % n;
            for col in 0..side {
                let fj = col % n;
                let sign = checkerboard_sign(fi, fj);
                let slope_sign = sign * derivative;

                let offset = Vec3::new(
                    -fields.dx[(fi, fj)] * slope_sign,
                    fields.height[(fi, fj)] * sign,
                    -fields.dz[(fi, fj)] * slope_sign,
                );
                let normal = Vec3::new(
                    -fields.slope_x[(fi, fj)] * slope_sign,
                    1.0,
                    -fields.slope_z[(fi, fj)] * slope_sign,
                )
                .normalize();

                let idx = self.index(row, col);
                self.write(idx, offset, normal);
            }
        }
        Ok(())
    }

    /// Apply a plain N×N heightfield (no horizontal displacement).
    ///
    /// Normals come from central differences. The extra row and column copy
    /// the last interior row and column, since such fields do not tile.
    pub fn apply_heights(&mut self, heights: &Grid<f32>, height_scale: f32) -> Result<()> {
        let n = self.dimension;
        if heights.rows() != n || heights.cols() != n {
            return Err(OceanError::invalid(
                "heights",
                format!(
                    "shape {}x{} does not match mesh dimension {}",
                    heights.rows(),
                    heights.cols(),
                    n
                ),
            ));
        }

        let sample = |i: isize, j: isize| -> f32 {
            let i = i.clamp(0, n as isize - 1) as usize;
            let j = j.clamp(0, n as isize - 1) as usize;
            heights[(i, j)] * height_scale
        };
        let spacing2 = 2.0 * self.grid_spacing;

        let side = self.side();
        for row in 0..side {
            for col in 0..side {
                let (i, j) = (row.min(n - 1) as isize, col.min(n - 1) as isize);
                let dh_dx = (sample(i, j + 1) - sample(i, j - 1)) / spacing2;
                let dh_dz = (sample(i + 1, j) - sample(i - 1, j)) / spacing2;

                let offset = Vec3::new(0.0, sample(i, j), 0.0);
                let normal = Vec3::new(-dh_dx, 1.0, -dh_dz).normalize();

                let idx = self.index(row, col);
                self.write(idx, offset, normal);
            }
        }
        Ok(())
    }
}
