use escore_core::models::{BackendKind, ScoreInput};
use escore_engine::{ScoringEngine, TransformFn, WeightFn};
use ndarray::{s, Array1, Array2, Array3, Axis};
use proptest::prelude::*;

fn arb_ensemble() -> impl Strategy<Value = (Array3<f64>, Array2<f64>)> {
    (1usize..4, 1usize..7, 1usize..5).prop_flat_map(|(batch, members, variables)| {
        (
            prop::collection::vec(-5.0f64..5.0, batch * members * variables),
            prop::collection::vec(-5.0f64..5.0, batch * variables),
        )
            .prop_map(move |(f, o)| {
                (
                    Array3::from_shape_vec((batch, members, variables), f).unwrap(),
                    Array2::from_shape_vec((batch, variables), o).unwrap(),
                )
            })
    })
}

fn arb_backend() -> impl Strategy<Value = BackendKind> {
    prop_oneof![
        Just(BackendKind::Ndarray),
        Just(BackendKind::Compiled),
        Just(BackendKind::Traced),
    ]
}

/// Every variant with a non-trivial weight or transform, labelled.
fn all_variants(
    engine: &ScoringEngine,
    input: &ScoreInput,
    backend: &str,
) -> Vec<(&'static str, Array1<f64>)> {
    let outcome = WeightFn::any_above(0.0);
    let transform = TransformFn::max_with(0.3);
    let vertical = WeightFn::any_above(0.5);
    vec![
        ("energy", engine.energy_score(input, backend).unwrap()),
        (
            "outcome_weighted",
            engine
                .outcome_weighted_energy_score(input, Some(&outcome), backend)
                .unwrap(),
        ),
        (
            "threshold_weighted",
            engine
                .threshold_weighted_energy_score(input, Some(&transform), backend)
                .unwrap(),
        ),
        (
            "vertically_rescaled",
            engine
                .vertically_rescaled_energy_score(input, Some(&vertical), backend)
                .unwrap(),
        ),
    ]
}

fn same_score(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    (a - b).abs() <= 1e-12 * a.abs().max(1.0)
}

// ── Non-negativity ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn scores_are_non_negative((f, o) in arb_ensemble(), backend in arb_backend()) {
        let engine = ScoringEngine::default();
        let input = ScoreInput::new(f.view(), o.view()).unwrap();

        for (variant, scores) in all_variants(&engine, &input, backend.as_str()) {
            for s in scores.iter().filter(|s| !s.is_nan()) {
                prop_assert!(*s >= -1e-12, "{} on {}: negative score {}", variant, backend, s);
            }
        }
    }
}

// ── Permutation invariance ──────────────────────────────────────────────

proptest! {
    #[test]
    fn member_order_does_not_matter(
        (f, o) in arb_ensemble(),
        backend in arb_backend(),
        shift in 0usize..7,
    ) {
        let engine = ScoringEngine::default();
        let members = f.len_of(Axis(1));
        let order: Vec<usize> = (0..members).rev().map(|m| (m + shift) % members).collect();
        let permuted = f.select(Axis(1), &order);

        let a = ScoreInput::new(f.view(), o.view()).unwrap();
        let b = ScoreInput::new(permuted.view(), o.view()).unwrap();
        let backend = backend.as_str();

        let original = all_variants(&engine, &a, backend);
        let reordered = all_variants(&engine, &b, backend);
        for ((variant, x), (_, y)) in original.iter().zip(&reordered) {
            for (p, q) in x.iter().zip(y) {
                prop_assert!(same_score(*p, *q), "{}: {} vs {}", variant, p, q);
            }
        }
    }
}

// ── Batch independence ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn each_instance_scores_alone((f, o) in arb_ensemble(), backend in arb_backend()) {
        let engine = ScoringEngine::default();
        let input = ScoreInput::new(f.view(), o.view()).unwrap();
        let backend = backend.as_str();
        let batched = all_variants(&engine, &input, backend);

        for b in 0..f.len_of(Axis(0)) {
            let fb = f.slice(s![b..b + 1, .., ..]);
            let ob = o.slice(s![b..b + 1, ..]);
            let alone = all_variants(&engine, &ScoreInput::new(fb, ob).unwrap(), backend);
            for ((variant, whole), (_, single)) in batched.iter().zip(&alone) {
                prop_assert_eq!(single.len(), 1);
                prop_assert!(
                    same_score(single[0], whole[b]),
                    "{} instance {}: {} vs {}",
                    variant,
                    b,
                    single[0],
                    whole[b]
                );
            }
        }
    }
}
