//! Static frequency-domain tables for the Tessendorf ocean.
//!
//! A [`SpectrumTable`] is built once per parameter set and never mutated.
//! Changing wind, amplitude, length or period means building a new one.

use std::f32::consts::PI;

use glam::Vec2;
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustfft::num_complex::Complex32;

use crate::error::Result;
use crate::grid::Grid;
use crate::params::OceanParams;

/// Wavevectors shorter than this are treated as the DC term.
pub const K_EPSILON: f32 = 1e-6;

/// Fraction of the wind wave length below which ripples are suppressed
const SMALL_WAVE_DAMPING: f32 = 0.001;

/// Source of standard-normal complex samples.
///
/// The only randomness in the crate goes through this trait, so tests can
/// substitute a fixed sequence.
pub trait GaussianSource {
    /// Complex sample whose real and imaginary parts are independent N(0, 1).
    fn next_gaussian_complex(&mut self) -> Complex32;
}

/// Seeded ChaCha8 generator using the Marsaglia polar method.
pub struct SeededGaussian {
    rng: ChaCha8Rng,
}

impl SeededGaussian {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl GaussianSource for SeededGaussian {
    fn next_gaussian_complex(&mut self) -> Complex32 {
        loop {
            let x1: f32 = self.rng.gen_range(-1.0..1.0);
            let x2: f32 = self.rng.gen_range(-1.0..1.0);
            let w = x1 * x1 + x2 * x2;
            if w > 0.0 && w < 1.0 {
                let scale = ((-2.0 * w.ln()) / w).sqrt();
                return Complex32::new(x1 * scale, x2 * scale);
            }
        }
    }
}

/// Per-bin initial amplitudes, mirror amplitudes and lookup tables.
#[derive(Debug, Clone)]
pub struct SpectrumTable {
    params: OceanParams,
    h0: Grid<Complex32>,
    h0_conj: Grid<Complex32>,
    kx: Grid<f32>,
    kz: Grid<f32>,
    k_length: Grid<f32>,
    dispersion: Grid<f32>,
}

impl SpectrumTable {
    /// Build the table drawing amplitudes from `gaussian`. O(N²).
    pub fn new(params: &OceanParams, gaussian: &mut impl GaussianSource) -> Result<Self> {
        params.validate()?;
        let n = params.dimension;

        if params.is_degenerate() {
            warn!(
                "Degenerate ocean spectrum (amplitude {}, wind {}): surface will stay flat",
                params.amplitude, params.wind
            );
        }

        let kx = Grid::try_from_fn(n, n, "kx table", |i, j| wavevector(params, i, j).x)?;
        let kz = Grid::try_from_fn(n, n, "kz table", |i, j| wavevector(params, i, j).y)?;
        let k_length = kx.zip_map(&kz, "k length table", |x, z| (x * x + z * z).sqrt())?;
        let dispersion = Grid::try_from_fn(n, n, "dispersion table", |i, j| {
            dispersion(params, i, j)
        })?;

        let h0 = Grid::try_from_fn(n, n, "h0", |i, j| {
            let r = gaussian.next_gaussian_complex();
            r * (phillips(params, wavevector(params, i, j)) / 2.0).sqrt()
        })?;

        // The mirror amplitude pairs each bin with the bin holding -k, so the
        // spatial field comes out real.
        let h0_conj = Grid::try_from_fn(n, n, "h0 mirror", |i, j| {
            h0[((n - i) % n, (n - j) % n)].conj()
        })?;

        info!(
            "Spectrum table built: N={}, A={}, wind={}, L={}m, period={}s, p={}",
            n,
            params.amplitude,
            params.wind,
            params.length_m,
            params.period_s,
            params.directional_exponent
        );

        Ok(Self {
            params: params.clone(),
            h0,
            h0_conj,
            kx,
            kz,
            k_length,
            dispersion,
        })
    }

    /// Build the table with the generator seeded from `params.seed`.
    pub fn from_seed(params: &OceanParams) -> Result<Self> {
        Self::new(params, &mut SeededGaussian::new(params.seed))
    }

    pub fn params(&self) -> &OceanParams {
        &self.params
    }

    pub fn dimension(&self) -> usize {
        self.params.dimension
    }

    /// Initial amplitudes h0(k)
    pub fn h0(&self) -> &Grid<Complex32> {
        &self.h0
    }

    /// Mirror amplitudes conj(h0(-k))
    pub fn h0_conj(&self) -> &Grid<Complex32> {
        &self.h0_conj
    }

    pub fn kx(&self) -> &Grid<f32> {
        &self.kx
    }

    pub fn kz(&self) -> &Grid<f32> {
        &self.kz
    }

    /// |k| per bin
    pub fn k_length(&self) -> &Grid<f32> {
        &self.k_length
    }

    /// Quantized angular frequency per bin (rad/s)
    pub fn dispersion_table(&self) -> &Grid<f32> {
        &self.dispersion
    }

    /// Wavevector for bin (i, j)
    pub fn wavevector(&self, i: usize, j: usize) -> Vec2 {
        wavevector(&self.params, i, j)
    }

    /// Phillips spectrum for this table's parameters
    pub fn phillips(&self, k: Vec2) -> f32 {
        phillips(&self.params, k)
    }

    /// Quantized dispersion for bin (i, j); pure and time invariant
    pub fn dispersion(&self, i: usize, j: usize) -> f32 {
        dispersion(&self.params, i, j)
    }

    /// Largest |k| on the grid, reached at the (0, 0) corner bin: √2·πN/L.
    pub fn max_wavenumber(&self) -> f32 {
        self.k_length.iter().copied().fold(0.0, f32::max)
    }
}

/// k(i, j) = (π(2j − N)/L, π(2i − N)/L), with x along columns and z along rows.
pub fn wavevector(params: &OceanParams, i: usize, j: usize) -> Vec2 {
    let n = params.dimension as f32;
    Vec2::new(
        PI * (2.0 * j as f32 - n) / params.length_m,
        PI * (2.0 * i as f32 - n) / params.length_m,
    )
}

/// Phillips spectrum P(k) = A·exp(−1/(k²L_w²))/k⁴·|k̂·ŵ|^p·exp(−k²(L_w·0.001)²)
pub fn phillips(params: &OceanParams, k: Vec2) -> f32 {
    let k_length = k.length();
    if k_length < K_EPSILON {
        return 0.0;
    }

    let wind_length = params.wind.length();
    if wind_length < K_EPSILON {
        return 0.0;
    }

    let k_length2 = k_length * k_length;
    let k_length4 = k_length2 * k_length2;

    let k_dot_w = (k / k_length).dot(params.wind / wind_length).abs();
    let directional = k_dot_w.powi(params.directional_exponent as i32);

    let l = params.wind_wave_length();
    let l2 = l * l;
    let damping = (l * SMALL_WAVE_DAMPING).powi(2);

    params.amplitude * (-1.0 / (k_length2 * l2)).exp() / k_length4
        * directional
        * (-k_length2 * damping).exp()
}

/// ω(i, j) = floor(√(g|k|)/ω0)·ω0, quantized so the animation loops every period.
pub fn dispersion(params: &OceanParams, i: usize, j: usize) -> f32 {
    let w0 = params.base_frequency();
    let k_length = wavevector(params, i, j).length();
    ((params.gravity * k_length).sqrt() / w0).floor() * w0
}
