//! Scatter-add photon splatting.

use super::photon::Photon;

/// Discretely normalized Gaussian footprint.
///
/// Weights are recomputed per photon for its sub-texel offset and then
/// divided by their sum, so every photon deposits exactly its weight no
/// matter where it lands.
pub struct SplatKernel {
    sigma: f32,
    radius: i32,
    weights: Vec<f32>,
}

impl SplatKernel {
    pub fn new(sigma: f32, radius: i32) -> Self {
        let width = (2 * radius + 1) as usize;
        Self {
            sigma,
            radius,
            weights: vec![0.0; width * width],
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Fill the weights for a photon at `offset` from its nearest texel centre.
    fn prepare(&mut self, offset_x: f32, offset_y: f32) {
        let inv_two_sigma2 = 1.0 / (2.0 * self.sigma * self.sigma);
        let r = self.radius;
        let mut total = 0.0;
        let mut k = 0;
        for dy in -r..=r {
            for dx in -r..=r {
                let ex = dx as f32 - offset_x;
                let ey = dy as f32 - offset_y;
                let w = (-(ex * ex + ey * ey) * inv_two_sigma2).exp();
                self.weights[k] = w;
                total += w;
                k += 1;
            }
        }
        if total > 0.0 {
            for w in &mut self.weights {
                *w /= total;
            }
        }
    }
}

/// Accumulate every photon into a `size × size` toroidal buffer.
pub fn accumulate(
    photons: &[Photon],
    size: usize,
    weight_per_photon: f32,
    kernel: &mut SplatKernel,
) -> Vec<f32> {
    let mut accum = vec![0.0f32; size * size];
    let wrap = size as i64;
    let r = kernel.radius;

    for photon in photons {
        let cx = photon.texel.x.round();
        let cy = photon.texel.y.round();
        kernel.prepare(photon.texel.x - cx, photon.texel.y - cy);

        let weight = weight_per_photon * photon.transmittance;
        let (cx, cy) = (cx as i64, cy as i64);
        let mut k = 0;
        for dy in -r..=r {
            let row = (cy + dy as i64).rem_euclid(wrap) as usize;
            for dx in -r..=r {
                let col = (cx + dx as i64).rem_euclid(wrap) as usize;
                accum[row * size + col] += weight * kernel.weights[k];
                k += 1;
            }
        }
    }
    accum
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn photon(x: f32, y: f32) -> Photon {
        Photon {
            texel: Vec2::new(x, y),
            transmittance: 1.0,
        }
    }

    #[test]
    fn test_single_splat_conserves_weight() {
        let mut kernel = SplatKernel::new(2.0, 6);
        for (x, y) in [(8.0, 8.0), (8.3, 7.6), (0.2, 15.9)] {
            let accum = accumulate(&[photon(x, y)], 16, 3.0, &mut kernel);
            let total: f32 = accum.iter().sum();
            assert!((total - 3.0).abs() < 1e-4, "total {}", total);
        }
    }

    #[test]
    fn test_splat_peaks_at_photon() {
        let mut kernel = SplatKernel::new(1.0, 3);
        let accum = accumulate(&[photon(5.0, 9.0)], 16, 1.0, &mut kernel);
        let peak = accum[9 * 16 + 5];
        assert!(accum.iter().all(|&v| v <= peak));
        // Symmetric around the centre
        assert!((accum[9 * 16 + 4] - accum[9 * 16 + 6]).abs() < 1e-7);
    }

    #[test]
    fn test_splat_wraps_across_edges() {
        let mut kernel = SplatKernel::new(1.0, 3);
        let accum = accumulate(&[photon(0.0, 0.0)], 16, 1.0, &mut kernel);
        assert!(accum[15] > 0.0);
        assert!(accum[15 * 16] > 0.0);
    }

    #[test]
    fn test_regular_lattice_is_uniform() {
        let mut kernel = SplatKernel::new(2.0, 6);
        let photons: Vec<Photon> = (0..8)
            .flat_map(|i| (0..8).map(move |j| photon(j as f32, i as f32)))
            .collect();
        let accum = accumulate(&photons, 8, 1.0, &mut kernel);
        for v in accum {
            assert!((v - 1.0).abs() < 1e-4);
        }
    }
}
