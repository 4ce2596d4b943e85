//! Traced backend: one reverse-mode tape per instance.
//!
//! Forecast members and the observation are tape leaves; weights enter as
//! constants. Replaying the tape backwards yields d(score)/d(forecast) and
//! d(score)/d(observation) alongside the score itself.

pub mod tape;

use escore_core::config::KernelConfig;
use escore_core::constants::ZERO_REFERENCE;
use escore_core::errors::EscoreResult;
use escore_core::models::{BackendKind, ScoreInput, ScoreVariant, Weights};
use escore_core::tape_span;
use escore_core::traits::IScoreBackend;
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

pub use tape::{Tape, Var};

/// Scores with their gradients.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedScores {
    pub scores: Array1<f64>,
    /// d(score_b)/d(forecast_b), (batch, members, variables).
    pub forecast_gradients: Array3<f64>,
    /// d(score_b)/d(observation_b), (batch, variables).
    pub observation_gradients: Array2<f64>,
}

struct InstanceTrace {
    score: f64,
    forecast_gradient: Vec<f64>,
    observation_gradient: Vec<f64>,
}

/// Tape-recording evaluator.
#[derive(Debug, Clone, Default)]
pub struct TracedBackend {
    config: KernelConfig,
}

impl TracedBackend {
    pub fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    /// Score `input` and differentiate each instance's score with respect
    /// to its forecast and observation values.
    ///
    /// `weights` of `None` means unit weights. `ThresholdWeighted` is traced
    /// as the energy score of an already transformed input.
    pub fn score_with_gradients(
        &self,
        variant: ScoreVariant,
        input: &ScoreInput,
        weights: Option<&Weights>,
    ) -> EscoreResult<TracedScores> {
        let shape = input.shape();
        if let Some(w) = weights {
            w.check_shape(&shape)?;
        }
        let traces = self.trace_all(variant, input, weights, true);

        let mut scores = Array1::zeros(shape.batch);
        let mut forecast_gradients = Array3::zeros((shape.batch, shape.members, shape.variables));
        let mut observation_gradients = Array2::zeros((shape.batch, shape.variables));
        for (b, trace) in traces.into_iter().enumerate() {
            scores[b] = trace.score;
            forecast_gradients
                .index_axis_mut(Axis(0), b)
                .iter_mut()
                .zip(trace.forecast_gradient)
                .for_each(|(slot, g)| *slot = g);
            observation_gradients
                .index_axis_mut(Axis(0), b)
                .iter_mut()
                .zip(trace.observation_gradient)
                .for_each(|(slot, g)| *slot = g);
        }

        Ok(TracedScores {
            scores,
            forecast_gradients,
            observation_gradients,
        })
    }

    fn scores_only(
        &self,
        variant: ScoreVariant,
        input: &ScoreInput,
        weights: Option<&Weights>,
    ) -> EscoreResult<Array1<f64>> {
        if let Some(w) = weights {
            w.check_shape(&input.shape())?;
        }
        let traces = self.trace_all(variant, input, weights, false);
        Ok(traces.into_iter().map(|t| t.score).collect())
    }

    fn trace_all(
        &self,
        variant: ScoreVariant,
        input: &ScoreInput,
        weights: Option<&Weights>,
        with_gradients: bool,
    ) -> Vec<InstanceTrace> {
        let batch = input.shape().batch;
        let _span = tape_span!(variant, batch).entered();

        let run = |b: usize| {
            let (members, observation) = input.instance(b);
            let instance_weights = weights.map(|w| {
                (
                    w.members().index_axis_move(Axis(0), b),
                    w.observation()[b],
                )
            });
            trace_instance(variant, members, observation, instance_weights, with_gradients)
        };

        if self.config.runs_parallel(batch) {
            (0..batch).into_par_iter().map(run).collect()
        } else {
            (0..batch).map(run).collect()
        }
    }
}

fn trace_instance(
    variant: ScoreVariant,
    members: ArrayView2<'_, f64>,
    observation: ArrayView1<'_, f64>,
    weights: Option<(ArrayView1<'_, f64>, f64)>,
    with_gradients: bool,
) -> InstanceTrace {
    let (m, d) = members.dim();
    let mf = m as f64;
    let weight = |i: usize| weights.map_or(1.0, |(w, _)| w[i]);
    let wy = weights.map_or(1.0, |(_, wy)| wy);

    let mut tape = Tape::with_capacity((m * m + 2 * m + 1) * (3 * d + 3));
    let xs: Vec<Vec<Var>> = members
        .outer_iter()
        .map(|row| row.iter().map(|&v| tape.leaf(v)).collect())
        .collect();
    let y: Vec<Var> = observation.iter().map(|&v| tape.leaf(v)).collect();

    let errors: Vec<Var> = xs
        .iter()
        .enumerate()
        .map(|(i, x)| {
            let dist = tape.euclidean(x, &y);
            tape.scale(dist, weight(i) * wy)
        })
        .collect();
    let accuracy = tape.sum(&errors);

    // Ordered pairs i != j; self-pairs contribute exactly zero.
    let mut pair_terms = Vec::with_capacity(m * m.saturating_sub(1));
    for i in 0..m {
        for j in (0..m).filter(|&j| j != i) {
            let dist = tape.euclidean(&xs[i], &xs[j]);
            pair_terms.push(tape.scale(dist, weight(i) * weight(j)));
        }
    }
    let spread = tape.sum(&pair_terms);

    let output = match variant {
        ScoreVariant::Energy | ScoreVariant::ThresholdWeighted => {
            energy_form(&mut tape, accuracy, spread, mf)
        }
        ScoreVariant::OutcomeWeighted => {
            let weight_sum: f64 = (0..m).map(weight).sum();
            let accuracy_norm = weight_sum * wy;
            let spread_norm = weight_sum * weight_sum;
            if accuracy_norm == 0.0 || spread_norm == 0.0 {
                tape.constant(f64::NAN)
            } else {
                let a = tape.scale(accuracy, 1.0 / accuracy_norm);
                let s = tape.scale(spread, 0.5 / spread_norm);
                tape.sub(a, s)
            }
        }
        ScoreVariant::VerticallyRescaled => {
            let base = energy_form(&mut tape, accuracy, spread, mf);
            let origin: Vec<Var> = (0..d).map(|_| tape.constant(ZERO_REFERENCE)).collect();
            let weighted_norms: Vec<Var> = xs
                .iter()
                .enumerate()
                .map(|(i, x)| {
                    let n = tape.euclidean(x, &origin);
                    tape.scale(n, weight(i) / mf)
                })
                .collect();
            let mean_weighted_norm = tape.sum(&weighted_norms);
            let y_norm = tape.euclidean(&y, &origin);
            let observed_norm = tape.scale(y_norm, wy);
            let norm_gap = tape.sub(mean_weighted_norm, observed_norm);
            let mean_weight = (0..m).map(weight).sum::<f64>() / mf;
            let correction = tape.scale(norm_gap, mean_weight - wy);
            tape.add(base, correction)
        }
    };

    let score = tape.value(output);
    if !with_gradients {
        return InstanceTrace {
            score,
            forecast_gradient: Vec::new(),
            observation_gradient: Vec::new(),
        };
    }

    let adjoints = tape.backward(output);
    InstanceTrace {
        score,
        forecast_gradient: xs.iter().flatten().map(|v| adjoints[v.index()]).collect(),
        observation_gradient: y.iter().map(|v| adjoints[v.index()]).collect(),
    }
}

fn energy_form(tape: &mut Tape, accuracy: Var, spread: Var, m: f64) -> Var {
    let a = tape.scale(accuracy, 1.0 / m);
    let s = tape.scale(spread, 1.0 / (2.0 * m * m));
    tape.sub(a, s)
}

impl IScoreBackend for TracedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Traced
    }

    fn energy(&self, input: &ScoreInput) -> EscoreResult<Array1<f64>> {
        self.scores_only(ScoreVariant::Energy, input, None)
    }

    fn outcome_weighted(
        &self,
        input: &ScoreInput,
        weights: &Weights,
    ) -> EscoreResult<Array1<f64>> {
        self.scores_only(ScoreVariant::OutcomeWeighted, input, Some(weights))
    }

    fn vertically_rescaled(
        &self,
        input: &ScoreInput,
        weights: &Weights,
    ) -> EscoreResult<Array1<f64>> {
        self.scores_only(ScoreVariant::VerticallyRescaled, input, Some(weights))
    }
}
