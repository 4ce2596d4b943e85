//! Distance Engine: Euclidean norms along the variable axis.
//!
//! Slice functions serve the loop kernels; the ndarray helpers broadcast over
//! batch and member axes for the reference backend. Every squared sum is
//! clamped at zero before the square root.

use escore_core::constants::ZERO_REFERENCE;
use ndarray::{Array, Array1, Array2, Array3, ArrayView2, ArrayView3, Axis, RemoveAxis};

/// Distance between two equal-length vectors.
pub type DistanceFn = fn(&[f64], &[f64]) -> f64;

#[inline]
fn root(sum_sq: f64) -> f64 {
    sum_sq.max(0.0).sqrt()
}

#[inline]
fn sq(v: f64) -> f64 {
    v * v
}

/// ‖a − b‖ for vectors of any length.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    root(a.iter().zip(b).map(|(x, y)| sq(x - y)).sum())
}

/// ‖a − x₀‖ with x₀ the zero reference point.
pub fn norm(a: &[f64]) -> f64 {
    root(a.iter().map(|x| sq(x - ZERO_REFERENCE)).sum())
}

fn euclidean_1(a: &[f64], b: &[f64]) -> f64 {
    root(sq(a[0] - b[0]))
}

fn euclidean_2(a: &[f64], b: &[f64]) -> f64 {
    root(sq(a[0] - b[0]) + sq(a[1] - b[1]))
}

fn euclidean_3(a: &[f64], b: &[f64]) -> f64 {
    root(sq(a[0] - b[0]) + sq(a[1] - b[1]) + sq(a[2] - b[2]))
}

fn euclidean_4(a: &[f64], b: &[f64]) -> f64 {
    root(sq(a[0] - b[0]) + sq(a[1] - b[1]) + sq(a[2] - b[2]) + sq(a[3] - b[3]))
}

/// Pick the distance function for vectors of `variables` entries.
///
/// Lengths 1–4 get unrolled bodies; anything longer uses [`euclidean`].
/// The returned function indexes its arguments directly and must only be
/// called with vectors of exactly `variables` entries.
pub fn select_distance_fn(variables: usize) -> DistanceFn {
    match variables {
        1 => euclidean_1,
        2 => euclidean_2,
        3 => euclidean_3,
        4 => euclidean_4,
        _ => euclidean,
    }
}

/// Collapse the trailing (variable) axis of a difference array into norms.
fn norms_over_last<D: RemoveAxis>(diff: Array<f64, D>) -> Array<f64, D::Smaller> {
    let last = Axis(diff.ndim() - 1);
    diff.mapv(sq).sum_axis(last).mapv(root)
}

/// ‖xᵢ − y‖ for every member: (B, M, D) against (B, D) gives (B, M).
pub fn member_errors(
    forecasts: ArrayView3<'_, f64>,
    observations: ArrayView2<'_, f64>,
) -> Array2<f64> {
    norms_over_last(&forecasts - &observations.insert_axis(Axis(1)))
}

/// ‖xᵢ − xⱼ‖ for every ordered pair, self-pairs included: (B, M, D) gives (B, M, M).
pub fn member_spreads(forecasts: ArrayView3<'_, f64>) -> Array3<f64> {
    norms_over_last(&forecasts.insert_axis(Axis(2)) - &forecasts.insert_axis(Axis(1)))
}

/// ‖xᵢ − x₀‖ for every member: (B, M, D) gives (B, M).
pub fn member_norms(forecasts: ArrayView3<'_, f64>) -> Array2<f64> {
    norms_over_last(forecasts.mapv(|v| v - ZERO_REFERENCE))
}

/// ‖y − x₀‖ for every observation: (B, D) gives (B,).
pub fn observation_norms(observations: ArrayView2<'_, f64>) -> Array1<f64> {
    norms_over_last(observations.mapv(|v| v - ZERO_REFERENCE))
}
