//! Photon tracing from the surface down to the floor.

use glam::{Vec2, Vec3};

use crate::ocean::SurfaceMesh;
use crate::params::{CausticsParams, LightSource};

/// Refractive index of air
const AIR_IOR: f32 = 1.0;

/// A surface sample after refraction, landed on the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photon {
    /// Floor position in texels, wrapped into `[0, T)²` (x along columns)
    pub texel: Vec2,

    /// Fraction of incoming light that made it through the surface
    pub transmittance: f32,
}

/// Refract unit `incident` through a surface with unit `normal`.
///
/// `eta` is n1/n2. Returns `None` on total internal reflection or when the
/// ray hits the back of the surface.
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = -normal.dot(incident);
    if cos_i <= 0.0 {
        return None;
    }
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * incident + (eta * cos_i - k.sqrt()) * normal)
}

/// Schlick approximation of Fresnel transmittance (1 − reflectance).
pub fn schlick_transmittance(cos_i: f32, n1: f32, n2: f32) -> f32 {
    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    let reflectance = r0 + (1.0 - r0) * (1.0 - cos_i.clamp(0.0, 1.0)).powi(5);
    1.0 - reflectance
}

/// Trace one photon from a surface point.
///
/// The floor lies `params.ocean_depth_m` below the rest surface (y = 0).
/// Returns `None` if the photon never reaches the floor.
pub fn trace_photon(
    position: Vec3,
    normal: Vec3,
    params: &CausticsParams,
    tile_length: f32,
) -> Option<Photon> {
    let incident = match params.light {
        LightSource::Directional(dir) => dir.normalize(),
        LightSource::Point(light) => (position - light).normalize(),
    };
    let normal = normal.normalize();

    let refracted = refract(incident, normal, AIR_IOR / params.refractive_index)?;
    if refracted.y >= 0.0 {
        return None;
    }

    let floor_y = -params.ocean_depth_m;
    let travel = (floor_y - position.y) / refracted.y;
    if travel < 0.0 {
        return None;
    }
    let hit = position + refracted * travel;

    let texels_per_meter = params.tile_size as f32 / tile_length;
    let size = params.tile_size as f32;
    let texel = Vec2::new(
        (hit.x * texels_per_meter).rem_euclid(size),
        (hit.z * texels_per_meter).rem_euclid(size),
    );
    if !texel.is_finite() {
        return None;
    }

    let cos_i = -normal.dot(incident);
    Some(Photon {
        texel,
        transmittance: schlick_transmittance(cos_i, AIR_IOR, params.refractive_index),
    })
}

/// Trace every unique surface sample of `mesh`.
///
/// The seam row and column duplicate row 0 and column 0, so only the N×N
/// interior samples emit photons.
pub fn trace_surface(mesh: &SurfaceMesh, params: &CausticsParams) -> Vec<Photon> {
    let n = mesh.dimension();
    let tile_length = mesh.tile_length();
    let mut photons = Vec::with_capacity(n * n);

    for row in 0..n {
        for col in 0..n {
            let vertex = mesh.vertex(row, col);
            let traced = trace_photon(
                Vec3::from_array(vertex.position),
                Vec3::from_array(vertex.normal),
                params,
                tile_length,
            );
            if let Some(photon) = traced {
                photons.push(photon);
            }
        }
    }
    photons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WATER_IOR;

    #[test]
    fn test_straight_down_passes_unbent() {
        let refracted = refract(Vec3::NEG_Y, Vec3::Y, 1.0 / WATER_IOR).unwrap();
        assert!((refracted - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_snell_law() {
        let incident = Vec3::new(1.0, -1.0, 0.0).normalize();
        let eta = 1.0 / WATER_IOR;
        let refracted = refract(incident, Vec3::Y, eta).unwrap();

        let sin_i = incident.x;
        let sin_t = refracted.x / refracted.length();
        assert!((sin_t - sin_i * eta).abs() < 1e-5);
        assert!(refracted.y < 0.0);
    }

    #[test]
    fn test_total_internal_reflection() {
        // Leaving water at a grazing angle
        let incident = Vec3::new(0.9, -0.1, 0.0).normalize();
        assert!(refract(incident, Vec3::Y, WATER_IOR).is_none());
    }

    #[test]
    fn test_backfacing_rejected() {
        assert!(refract(Vec3::Y, Vec3::Y, 0.75).is_none());
    }

    #[test]
    fn test_schlick_bounds() {
        let head_on = schlick_transmittance(1.0, 1.0, WATER_IOR);
        assert!((head_on - 0.9796).abs() < 1e-3);
        assert!(schlick_transmittance(0.0, 1.0, WATER_IOR).abs() < 1e-6);
    }

    #[test]
    fn test_flat_surface_lands_below() {
        let params = CausticsParams {
            tile_size: 16,
            ..Default::default()
        };
        let photon = trace_photon(Vec3::new(3.0, 0.0, 5.0), Vec3::Y, &params, 16.0).unwrap();
        assert!((photon.texel - Vec2::new(3.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn test_floor_wraps_toroidally() {
        let params = CausticsParams {
            tile_size: 16,
            ocean_depth_m: 10.0,
            light: LightSource::Directional(Vec3::new(1.0, -1.0, 0.0)),
            ..Default::default()
        };
        let photon = trace_photon(Vec3::new(15.0, 0.0, 2.0), Vec3::Y, &params, 16.0).unwrap();
        assert!(photon.texel.x >= 0.0 && photon.texel.x < 16.0);
        assert!((photon.texel.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_light_spreads_outwards() {
        let params = CausticsParams {
            tile_size: 64,
            light: LightSource::Point(Vec3::new(32.0, 20.0, 32.0)),
            ..Default::default()
        };
        let photon = trace_photon(Vec3::new(40.0, 0.0, 32.0), Vec3::Y, &params, 64.0).unwrap();
        assert!(photon.texel.x > 40.0);
    }

    #[test]
    fn test_trace_surface_skips_seams() {
        let mesh = SurfaceMesh::new(8, 1.0).unwrap();
        let params = CausticsParams {
            tile_size: 8,
            ..Default::default()
        };
        assert_eq!(trace_surface(&mesh, &params).len(), 64);
    }
}
