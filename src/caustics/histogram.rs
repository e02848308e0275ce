//! Photon-map encoding and weighted histogram reduction.
//!
//! The photon map mirrors what a point-rendering pass would write into an
//! RGBA8 target: R and G hold the floor position quantized to a byte, B holds
//! the photon weight and A marks live pixels.

use image::{Rgba, RgbaImage};

use super::photon::Photon;

/// Byte range the floor coordinates are quantized into
const COORD_RANGE: f32 = 256.0;

/// Encode photons row by row into a `side × side` RGBA8 photon map.
///
/// Pixels past the last photon stay fully transparent.
pub fn encode(photons: &[Photon], side: usize, tile_size: usize) -> RgbaImage {
    let side_px = side as u32;
    let mut map = RgbaImage::new(side_px, side_px);
    let to_byte = COORD_RANGE / tile_size as f32;

    for (k, photon) in photons.iter().take(side * side).enumerate() {
        let x = (k % side) as u32;
        let y = (k / side) as u32;
        let r = (photon.texel.x * to_byte).floor().clamp(0.0, 255.0) as u8;
        let g = (photon.texel.y * to_byte).floor().clamp(0.0, 255.0) as u8;
        let b = (photon.transmittance * 255.0).round().clamp(0.0, 255.0) as u8;
        map.put_pixel(x, y, Rgba([r, g, b, 255]));
    }
    map
}

/// Weighted 2D histogram of the photon map with `bins` bins per axis over
/// the fixed `[0, 256)` byte range.
pub fn reduce(map: &RgbaImage, bins: usize, weight_per_photon: f32) -> Vec<f32> {
    let mut accum = vec![0.0f32; bins * bins];

    for pixel in map.pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        let col = r as usize * bins / COORD_RANGE as usize;
        let row = g as usize * bins / COORD_RANGE as usize;
        accum[row * bins + col] += weight_per_photon * (b as f32 / 255.0);
    }
    accum
}
