//! Time evaluation of the ocean spectrum and transform to the spatial domain.

use rustfft::num_complex::Complex32;

use super::mesh::SurfaceMesh;
use super::spectrum::{SpectrumTable, K_EPSILON};
use crate::error::Result;
use crate::fft::{Fft2d, FftConvention};
use crate::grid::Grid;
use crate::heightfield::Heightfield;

/// Spatial-domain fields for one instant, straight out of the transform.
///
/// Values are the real parts of the transformed spectra *before* the
/// checkerboard sign fix; [`SurfaceMesh::apply_fields`] applies it, together
/// with the derivative sign of `convention`.
#[derive(Debug, Clone)]
pub struct SpatialFields {
    pub time_s: f32,
    pub convention: FftConvention,
    pub height: Grid<f32>,
    pub dx: Grid<f32>,
    pub dz: Grid<f32>,
    pub slope_x: Grid<f32>,
    pub slope_z: Grid<f32>,
}

impl SpatialFields {
    pub fn dimension(&self) -> usize {
        self.height.rows()
    }
}

/// Complex spectra for one instant, before the transform.
#[derive(Debug, Clone)]
pub struct FrequencyFields {
    pub h_tilde: Grid<Complex32>,
    pub dx: Grid<Complex32>,
    pub dz: Grid<Complex32>,
    pub slope_x: Grid<Complex32>,
    pub slope_z: Grid<Complex32>,
}

/// Evaluates a [`SpectrumTable`] at arbitrary times.
///
/// Every call to [`evaluate`](Self::evaluate) returns a fresh bundle; nothing
/// is carried over between calls. Each field is reserved fallibly, so running
/// out of memory mid-animation is reported as an error rather than an abort.
pub struct HeightfieldSynthesizer {
    table: SpectrumTable,
    fft: Fft2d,
}

impl HeightfieldSynthesizer {
    pub fn new(table: SpectrumTable) -> Self {
        let fft = Fft2d::new(table.dimension(), table.params().fft_convention);
        Self { table, fft }
    }

    pub fn table(&self) -> &SpectrumTable {
        &self.table
    }

    pub fn dimension(&self) -> usize {
        self.table.dimension()
    }

    /// h̃(k, t) = h0·e^{iωt} + h0conj·e^{−iωt}
    pub fn h_tilde(&self, time_s: f32) -> Result<Grid<Complex32>> {
        let dispersion = self.table.dispersion_table();
        let h0_conj = self.table.h0_conj();

        self.table.h0().try_map_indexed("h tilde", |i, j, h0| {
            let (sin, cos) = (dispersion[(i, j)] * time_s).sin_cos();
            h0 * Complex32::new(cos, sin) + h0_conj[(i, j)] * Complex32::new(cos, -sin)
        })
    }

    /// Height, displacement and slope spectra at `time_s`.
    pub fn frequency_fields(&self, time_s: f32) -> Result<FrequencyFields> {
        let h_tilde = self.h_tilde(time_s)?;
        let kx = self.table.kx();
        let kz = self.table.kz();
        let k_length = self.table.k_length();

        let slope_x =
            h_tilde.try_map_indexed("slope x", |i, j, h| h * Complex32::new(0.0, kx[(i, j)]))?;
        let slope_z =
            h_tilde.try_map_indexed("slope z", |i, j, h| h * Complex32::new(0.0, kz[(i, j)]))?;

        // No horizontal displacement for the DC term.
        let dx = h_tilde.try_map_indexed("displacement x", |i, j, h| {
            let len = k_length[(i, j)];
            if len < K_EPSILON {
                Complex32::new(0.0, 0.0)
            } else {
                h * Complex32::new(0.0, -kx[(i, j)] / len)
            }
        })?;
        let dz = h_tilde.try_map_indexed("displacement z", |i, j, h| {
            let len = k_length[(i, j)];
            if len < K_EPSILON {
                Complex32::new(0.0, 0.0)
            } else {
                h * Complex32::new(0.0, -kz[(i, j)] / len)
            }
        })?;

        Ok(FrequencyFields {
            h_tilde,
            dx,
            dz,
            slope_x,
            slope_z,
        })
    }

    /// Evaluate all five fields at `time_s` and bring them to the spatial domain.
    pub fn evaluate(&self, time_s: f32) -> Result<SpatialFields> {
        let FrequencyFields {
            h_tilde,
            dx,
            dz,
            slope_x,
            slope_z,
        } = self.frequency_fields(time_s)?;

        Ok(SpatialFields {
            time_s,
            convention: self.table.params().fft_convention,
            height: self.transform(h_tilde)?,
            dx: self.transform(dx)?,
            dz: self.transform(dz)?,
            slope_x: self.transform(slope_x)?,
            slope_z: self.transform(slope_z)?,
        })
    }

    /// Transform a spectrum in place and keep its real part.
    pub fn transform(&self, mut spectrum: Grid<Complex32>) -> Result<Grid<f32>> {
        self.fft.process(&mut spectrum);
        spectrum.try_map("spatial field", |c| c.re)
    }

    /// Transform without discarding the imaginary part (diagnostics only).
    pub fn transform_complex(&self, mut spectrum: Grid<Complex32>) -> Grid<Complex32> {
        self.fft.process(&mut spectrum);
        spectrum
    }
}

impl Heightfield for HeightfieldSynthesizer {
    fn dimension(&self) -> usize {
        self.table.dimension()
    }

    fn update(&mut self, time_s: f32, mesh: &mut SurfaceMesh) -> Result<()> {
        let fields = self.evaluate(time_s)?;
        mesh.apply_fields(&fields)
    }
}
