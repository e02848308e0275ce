//! Property-based invariant tests for the ocean and caustics pipeline.
//!
//! 1. Seam vertices carry the same displacement and normal as the opposite edge.
//! 2. Mirror amplitudes are the conjugates of the amplitudes at −k.
//! 3. Dispersion is pure: identical bits for identical inputs.
//! 4. The Phillips spectrum is never negative or NaN.
//! 5. Caustics intensity is finite and non-negative for any surface and light.

use caustic_sea::caustics::CausticsAccumulator;
use caustic_sea::ocean::{dispersion, phillips, HeightfieldSynthesizer, SpectrumTable, SurfaceMesh};
use caustic_sea::params::{CausticsParams, CausticsStrategy, LightSource, OceanParams};
use caustic_sea::Heightfield;
use glam::{Vec2, Vec3};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn dimension_strategy() -> impl Strategy<Value = usize> {
    (2u32..=5).prop_map(|e| 1usize << e)
}

fn ocean_strategy() -> impl Strategy<Value = OceanParams> {
    (
        dimension_strategy(),
        0.0f32..0.01,
        -40.0f32..40.0,
        -40.0f32..40.0,
        8.0f32..256.0,
        prop_oneof![Just(2u32), Just(6u32)],
        any::<u64>(),
    )
        .prop_map(|(dimension, amplitude, wx, wz, length_m, exponent, seed)| OceanParams {
            dimension,
            amplitude,
            wind: Vec2::new(wx, wz),
            length_m,
            directional_exponent: exponent,
            seed,
            ..Default::default()
        })
}

fn light_strategy() -> impl Strategy<Value = LightSource> {
    prop_oneof![
        (-1.0f32..1.0, -1.0f32..1.0)
            .prop_map(|(x, z)| LightSource::Directional(Vec3::new(x, -1.0, z))),
        (-50.0f32..50.0, 1.0f32..100.0, -50.0f32..50.0)
            .prop_map(|(x, y, z)| LightSource::Point(Vec3::new(x, y, z))),
    ]
}

fn surface(params: &OceanParams, time_s: f32) -> SurfaceMesh {
    let mut synth = HeightfieldSynthesizer::new(SpectrumTable::from_seed(params).unwrap());
    let mut mesh = SurfaceMesh::new(params.dimension, params.grid_spacing_m()).unwrap();
    synth.update(time_s, &mut mesh).unwrap();
    mesh
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Seam continuity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn seams_match_opposite_edge(params in ocean_strategy(), time_s in 0.0f32..500.0) {
        let mesh = surface(&params, time_s);
        let n = params.dimension;

        for k in 0..=n {
            prop_assert_eq!(mesh.offset(n, k), mesh.offset(0, k), "bottom seam at column {}", k);
            prop_assert_eq!(mesh.offset(k, n), mesh.offset(k, 0), "right seam at row {}", k);
            prop_assert_eq!(mesh.vertex(n, k).normal, mesh.vertex(0, k).normal);
            prop_assert_eq!(mesh.vertex(k, n).normal, mesh.vertex(k, 0).normal);
        }
        prop_assert_eq!(mesh.offset(n, n), mesh.offset(0, 0));
        prop_assert_eq!(mesh.vertex(n, n).normal, mesh.vertex(0, 0).normal);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Hermitian mirror
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mirror_is_conjugate_of_negated_k(params in ocean_strategy()) {
        let table = SpectrumTable::from_seed(&params).unwrap();
        let n = params.dimension;

        for i in 0..n {
            for j in 0..n {
                let mirrored = table.h0()[((n - i) % n, (n - j) % n)].conj();
                prop_assert_eq!(table.h0_conj()[(i, j)], mirrored, "bin ({}, {})", i, j);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Dispersion determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dispersion_is_pure(params in ocean_strategy(), i in 0usize..32, j in 0usize..32) {
        let (i, j) = (i % params.dimension, j % params.dimension);
        let first = dispersion(&params, i, j);
        let second = dispersion(&params, i, j);
        prop_assert_eq!(first.to_bits(), second.to_bits());

        let table = SpectrumTable::from_seed(&params).unwrap();
        prop_assert_eq!(table.dispersion_table()[(i, j)].to_bits(), first.to_bits());
        prop_assert!(first >= 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Phillips spectrum is well-behaved
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn phillips_non_negative(params in ocean_strategy(), kx in -10.0f32..10.0, kz in -10.0f32..10.0) {
        let value = phillips(&params, Vec2::new(kx, kz));
        prop_assert!(value.is_finite(), "P({}, {}) = {}", kx, kz, value);
        prop_assert!(value >= 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Caustics non-negativity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn caustics_non_negative(
        params in ocean_strategy(),
        time_s in 0.0f32..100.0,
        light in light_strategy(),
        depth in 0.5f32..60.0,
        histogram in any::<bool>(),
    ) {
        let mesh = surface(&params, time_s);
        let strategy = if histogram { CausticsStrategy::Histogram } else { CausticsStrategy::Splat };
        let mut caustics = CausticsAccumulator::new(CausticsParams {
            tile_size: params.dimension,
            ocean_depth_m: depth,
            light,
            strategy,
            ..Default::default()
        })
        .unwrap();

        let buffer = caustics.update(&mesh).unwrap();
        prop_assert_eq!(buffer.size(), params.dimension);
        for &value in buffer.as_slice() {
            prop_assert!(value.is_finite() && value >= 0.0, "bad intensity {}", value);
        }
    }
}
