//! Read-only caustics intensity snapshots.

use std::sync::Arc;

use image::{GrayImage, Luma};

/// T×T single-channel light intensity, row-major (rows along z).
///
/// Cloning shares the underlying storage; a snapshot handed to the
/// presentation layer never changes after it is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityBuffer {
    size: usize,
    data: Arc<[f32]>,
}

impl IntensityBuffer {
    /// Wrap accumulated values. `data.len()` must be `size * size`.
    pub(crate) fn from_vec(size: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), size * size);
        Self {
            size,
            data: data.into(),
        }
    }

    /// All-dark buffer, used before the first update.
    pub fn zeros(size: usize) -> Self {
        Self::from_vec(size, vec![0.0; size * size])
    }

    /// Texels per side (T)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.size && col < self.size {
            Some(self.data[row * self.size + col])
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn mean(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        // f64 keeps large buffers from drifting
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        (sum / self.data.len() as f64) as f32
    }

    pub fn std_dev(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mean = self.mean() as f64;
        let variance: f64 = self
            .data
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / self.data.len() as f64;
        variance.sqrt() as f32
    }

    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(0.0, f32::max)
    }

    pub fn min(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// 8-bit grayscale image normalized to the buffer maximum.
    ///
    /// An all-dark buffer maps to black rather than dividing by zero.
    pub fn to_luma_image(&self) -> GrayImage {
        let max = self.max();
        let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
        let size = self.size as u32;

        GrayImage::from_fn(size, size, |x, y| {
            let value = self.data[y as usize * self.size + x as usize];
            Luma([(value * scale).round().clamp(0.0, 255.0) as u8])
        })
    }
}
