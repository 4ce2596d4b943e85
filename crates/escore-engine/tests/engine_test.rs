//! Error paths, degenerate weighting, input shapes, and gradients.

use escore_core::errors::{BackendError, EscoreError, EscoreErrorCode, ShapeError};
use escore_core::models::{ScoreInput, ScoreVariant};
use escore_engine::{
    energy_score, outcome_weighted_energy_score, threshold_weighted_energy_score, ScoreRequest,
    ScoringEngine, TransformFn, WeightFn,
};
use ndarray::{array, Array1, Array2, Array3, ArrayView1};

// ── Errors ──────────────────────────────────────────────────────────────

#[test]
fn unsupported_backend_lists_identifiers() {
    let f = array![[0.0, 1.0], [1.0, 0.0]];
    let o = array![0.5, 0.5];
    let err = energy_score(f.view(), o.view(), "cuda").unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED_BACKEND");
    let msg = err.to_string();
    assert!(msg.contains("cuda"), "{msg}");
    assert!(msg.contains("ndarray, compiled, traced"), "{msg}");
}

#[test]
fn batch_mismatch_is_reported_before_scoring() {
    let f = Array3::<f64>::zeros((4, 3, 2));
    let o = Array2::<f64>::zeros((5, 2));
    let err = energy_score(f.view(), o.view(), "compiled").unwrap_err();
    assert!(matches!(
        err,
        EscoreError::Shape(ShapeError::BatchMismatch {
            forecasts: 4,
            observations: 5
        })
    ));
    assert_eq!(err.error_code(), "SHAPE_MISMATCH");
}

#[test]
fn variable_mismatch_is_reported() {
    let f = Array3::<f64>::zeros((4, 3, 2));
    let o = Array2::<f64>::zeros((4, 3));
    let err = energy_score(f.view(), o.view(), "ndarray").unwrap_err();
    assert!(matches!(
        err,
        EscoreError::Shape(ShapeError::VariableMismatch { .. })
    ));
}

#[test]
fn shape_error_wins_over_backend_error() {
    let f = Array3::<f64>::zeros((4, 3, 2));
    let o = Array2::<f64>::zeros((5, 2));
    let err = energy_score(f.view(), o.view(), "cuda").unwrap_err();
    assert!(matches!(err, EscoreError::Shape(_)));
}

#[test]
fn transform_changing_length_is_rejected() {
    fn append_zero(v: ArrayView1<'_, f64>, _: &[f64]) -> Array1<f64> {
        v.iter().copied().chain([0.0]).collect()
    }
    let f = array![[0.0, 1.0], [1.0, 0.0]];
    let o = array![0.5, 0.5];
    let transform = TransformFn::new(append_zero, Vec::new());
    let err =
        threshold_weighted_energy_score(f.view(), o.view(), Some(&transform), "compiled")
            .unwrap_err();
    assert!(matches!(
        err,
        EscoreError::Shape(ShapeError::TransformLength {
            expected: 2,
            actual: 3
        })
    ));
}

#[test]
fn non_finite_caller_weights_propagate() {
    fn nan_weight(_: ArrayView1<'_, f64>, _: &[f64]) -> f64 {
        f64::NAN
    }
    let f = array![[0.0, 1.0], [1.0, 0.0]];
    let o = array![0.5, 0.5];
    let weight = WeightFn::new(nan_weight, Vec::new());
    let scores =
        outcome_weighted_energy_score(f.view(), o.view(), Some(&weight), "ndarray").unwrap();
    assert!(scores[0].is_nan());
}

// ── Degenerate weighting ────────────────────────────────────────────────

#[test]
fn zero_weight_instance_is_nan_and_others_are_not() {
    let engine = ScoringEngine::default();
    // Instance 1 has no member above 10.
    let f = array![[[11.0], [12.0]], [[1.0], [2.0]], [[15.0], [20.0]]];
    let o = array![[11.5], [11.5], [16.0]];
    let input = ScoreInput::new(f.view(), o.view()).unwrap();
    let weight = WeightFn::all_above(10.0);
    for backend in ["ndarray", "compiled", "traced"] {
        let scores = engine
            .outcome_weighted_energy_score(&input, Some(&weight), backend)
            .unwrap();
        assert!(scores[0].is_finite(), "{backend}");
        assert!(scores[1].is_nan(), "{backend}");
        assert!(scores[2].is_finite(), "{backend}");
    }
}

// ── Input shapes ────────────────────────────────────────────────────────

#[test]
fn single_member_ensemble_scores_distance() {
    let f = array![[[1.0, 2.0, 2.0]]];
    let o = array![[0.0, 0.0, 0.0]];
    for backend in ["ndarray", "compiled", "traced"] {
        let es = energy_score(f.view(), o.view(), backend).unwrap();
        assert!((es[0] - 3.0).abs() < 1e-15, "{backend}");
    }
}

#[test]
fn univariate_batch_and_single_instance_agree() {
    let engine = ScoringEngine::default();
    let batch = array![[0.0, 2.0, 4.0], [1.0, 3.0, 5.0]];
    let observations = array![1.0, 1.0];
    let input = ScoreInput::univariate(batch.view(), observations.view()).unwrap();
    let scores = engine.energy_score(&input, "compiled").unwrap();
    assert_eq!(scores.len(), 2);

    let single = energy_score(batch.row(1), ndarray::arr0(1.0).view(), "compiled").unwrap();
    assert_eq!(single.len(), 1);
    assert!((scores[1] - single[0]).abs() < 1e-15);
    // 5/3 - 16/18
    assert!((scores[0] - 7.0 / 9.0).abs() < 1e-14);
}

#[test]
fn square_univariate_batch_scores_every_instance() {
    let engine = ScoringEngine::default();
    let f = array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0], [6.0, 7.0, 8.0]];
    let o = array![1.0, 4.0, 7.0];
    let input = ScoreInput::univariate(f.view(), o.view()).unwrap();
    for backend in ["ndarray", "compiled", "traced"] {
        let scores = engine.energy_score(&input, backend).unwrap();
        assert_eq!(scores.len(), 3, "{backend}");
        // 2/3 - 8/18 per row
        for s in &scores {
            assert!((s - 2.0 / 9.0).abs() < 1e-14, "{backend}: {s}");
        }
    }
}

#[test]
fn two_dim_forecast_with_mismatched_observation_is_rejected() {
    let f = array![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]];
    let o = array![0.0, 1.0, 2.0];
    for backend in ["ndarray", "compiled", "traced"] {
        let err = energy_score(f.view(), o.view(), backend).unwrap_err();
        assert!(
            matches!(
                err,
                EscoreError::Shape(ShapeError::VariableMismatch {
                    forecasts: 2,
                    observations: 3
                })
            ),
            "{backend}: {err}"
        );
    }
}

#[test]
fn multivariate_single_instance_is_batch_of_one() {
    let f = array![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6]];
    let o = array![0.2, 0.2];
    let single = energy_score(f.view(), o.view(), "ndarray").unwrap();
    let lifted = f.clone().insert_axis(ndarray::Axis(0));
    let batched = energy_score(lifted.view(), o.view().insert_axis(ndarray::Axis(0)), "ndarray")
        .unwrap();
    assert_eq!(single, batched);
}

// ── Gradients ───────────────────────────────────────────────────────────

#[test]
fn gradients_match_finite_differences_through_engine() {
    let engine = ScoringEngine::default();
    let (f, o) = test_fixtures::random_ensemble(17, 2, 4, 2);
    let input = ScoreInput::new(f.view(), o.view()).unwrap();
    let request = ScoreRequest::VerticallyRescaled(WeightFn::any_above(0.0));
    let grads = engine.gradients(&request, &input).unwrap();
    assert_eq!(grads.forecasts.dim(), (2, 4, 2));
    assert_eq!(grads.observations.dim(), (2, 2));

    let h = 1e-6;
    for (index, &g) in grads.forecasts.indexed_iter() {
        let mut up = f.clone();
        let mut down = f.clone();
        up[index] += h;
        down[index] -= h;
        let score = |x: &Array3<f64>| {
            let shifted = ScoreInput::new(x.view(), o.view()).unwrap();
            // Weights evaluated at the unshifted input stay fixed.
            let weights = WeightFn::any_above(0.0).evaluate(&input);
            engine
                .registry()
                .traced()
                .score_with_gradients(ScoreVariant::VerticallyRescaled, &shifted, Some(&weights))
                .unwrap()
                .scores[index.0]
        };
        let fd = (score(&up) - score(&down)) / (2.0 * h);
        assert!((g - fd).abs() < 1e-5, "{index:?}: {g} vs {fd}");
    }
}

#[test]
fn threshold_gradients_are_zero_where_clamped() {
    let engine = ScoringEngine::default();
    let f = array![[[-1.0, 0.5], [0.7, 0.9]]];
    let o = array![[0.1, 0.2]];
    let input = ScoreInput::new(f.view(), o.view()).unwrap();
    let request = ScoreRequest::ThresholdWeighted(TransformFn::max_with(0.0));
    let grads = engine.gradients(&request, &input).unwrap();
    let scores = engine
        .threshold_weighted_energy_score(&input, Some(&TransformFn::max_with(0.0)), "ndarray")
        .unwrap();
    assert!((grads.scores[0] - scores[0]).abs() < 1e-12);
    assert!(grads.forecasts.iter().all(|g| g.is_finite()));
}

#[test]
fn unsupported_backend_error_is_backend_variant() {
    let engine = ScoringEngine::default();
    let f = array![[[0.0]]];
    let o = array![[0.0]];
    let input = ScoreInput::new(f.view(), o.view()).unwrap();
    let err = engine.energy_score(&input, "").unwrap_err();
    assert!(matches!(
        err,
        EscoreError::Backend(BackendError::Unsupported { .. })
    ));
}
