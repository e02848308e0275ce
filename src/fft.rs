//! Two-dimensional FFT over square complex grids, built on `rustfft`.

use std::sync::Arc;

use rustfft::{num_complex::Complex32, Fft, FftPlanner};

use crate::grid::Grid;

/// Direction of the transform used to bring spectra into the spatial domain.
///
/// Both directions are unnormalized (no `1/N²` factor). `Forward` yields the
/// point mirror of the tile produced by `Inverse`: `f_fwd(n) = f_inv(−n mod N)`.
/// Heights need only the checkerboard sign fix, but fields derived from `i·k`
/// (slopes and horizontal displacement) change sign under the mirror and must
/// be negated as well; see [`FftConvention::derivative_sign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FftConvention {
    #[default]
    Inverse,
    Forward,
}

impl FftConvention {
    /// Extra factor for `i·k` derived fields on top of the checkerboard sign.
    pub fn derivative_sign(self) -> f32 {
        match self {
            Self::Inverse => 1.0,
            Self::Forward => -1.0,
        }
    }
}

/// Planned row/column transform for an `n × n` grid.
pub struct Fft2d {
    n: usize,
    fft: Arc<dyn Fft<f32>>,
}

impl Fft2d {
    pub fn new(n: usize, convention: FftConvention) -> Self {
        let mut planner = FftPlanner::new();
        let fft = match convention {
            FftConvention::Inverse => planner.plan_fft_inverse(n),
            FftConvention::Forward => planner.plan_fft_forward(n),
        };
        Self { n, fft }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Transform `grid` in place: every row, then every column.
    pub fn process(&self, grid: &mut Grid<Complex32>) {
        debug_assert_eq!(grid.rows(), self.n);
        debug_assert_eq!(grid.cols(), self.n);

        let n = self.n;
        let mut scratch = vec![Complex32::new(0.0, 0.0); self.fft.get_inplace_scratch_len()];

        // Rows are contiguous, so they go straight through.
        self.fft
            .process_with_scratch(grid.as_mut_slice(), &mut scratch);

        let mut column = vec![Complex32::new(0.0, 0.0); n];
        for col in 0..n {
            for row in 0..n {
                column[row] = grid[(row, col)];
            }
            self.fft.process_with_scratch(&mut column, &mut scratch);
            for row in 0..n {
                grid[(row, col)] = column[row];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_only_spectrum_is_constant() {
        let n = 8;
        let mut grid = Grid::try_new(n, n, Complex32::new(0.0, 0.0), "test").unwrap();
        grid[(0, 0)] = Complex32::new(2.0, 0.0);

        Fft2d::new(n, FftConvention::Inverse).process(&mut grid);

        for v in grid.iter() {
            assert!((v.re - 2.0).abs() < 1e-6);
            assert!(v.im.abs() < 1e-6);
        }
    }

    #[test]
    fn test_forward_then_inverse_scales_by_cell_count() {
        let n = 4;
        let mut grid =
            Grid::try_from_fn(n, n, "test", |r, c| Complex32::new((r * n + c) as f32, 0.0))
                .unwrap();
        let original = grid.clone();

        Fft2d::new(n, FftConvention::Forward).process(&mut grid);
        Fft2d::new(n, FftConvention::Inverse).process(&mut grid);

        let scale = (n * n) as f32;
        for (a, b) in grid.iter().zip(original.iter()) {
            assert!((a.re / scale - b.re).abs() < 1e-4);
        }
    }

    #[test]
    fn test_forward_is_point_mirror_of_inverse() {
        let n = 8;
        let spectrum = Grid::try_from_fn(n, n, "test", |r, c| {
            Complex32::new((r * 3 + c) as f32 * 0.1, (r as f32 - c as f32) * 0.05)
        })
        .unwrap();

        let mut inverse = spectrum.clone();
        Fft2d::new(n, FftConvention::Inverse).process(&mut inverse);
        let mut forward = spectrum;
        Fft2d::new(n, FftConvention::Forward).process(&mut forward);

        for row in 0..n {
            for col in 0..n {
                let mirrored = inverse[((n - row) % n, (n - col) % n)];
                assert!((forward[(row, col)] - mirrored).norm() < 1e-4);
            }
        }
    }

    #[test]
    fn test_single_frequency_produces_checkerboard() {
        // The Nyquist bin in both axes evaluates to (-1)^(i+j).
        let n = 4;
        let mut grid = Grid::try_new(n, n, Complex32::new(0.0, 0.0), "test").unwrap();
        grid[(n / 2, n / 2)] = Complex32::new(1.0, 0.0);

        Fft2d::new(n, FftConvention::Inverse).process(&mut grid);

        for row in 0..n {
            for col in 0..n {
                let expected = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                assert!((grid[(row, col)].re - expected).abs() < 1e-5);
            }
        }
    }
}
