//! Stock weight functions and transforms.
//!
//! Threshold parameters are read from `args[0]`; a missing argument
//! defaults to 0.

use ndarray::{Array1, ArrayView1};

fn threshold(args: &[f64]) -> f64 {
    args.first().copied().unwrap_or(0.0)
}

fn indicator(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Constant weight 1.
pub fn ones(_: ArrayView1<'_, f64>, _: &[f64]) -> f64 {
    1.0
}

/// 1 when every component exceeds `args[0]`.
pub fn all_above(v: ArrayView1<'_, f64>, args: &[f64]) -> f64 {
    let t = threshold(args);
    indicator(v.iter().all(|&x| x > t))
}

/// 1 when every component is below `args[0]`.
pub fn all_below(v: ArrayView1<'_, f64>, args: &[f64]) -> f64 {
    let t = threshold(args);
    indicator(v.iter().all(|&x| x < t))
}

/// 1 when at least one component exceeds `args[0]`.
pub fn any_above(v: ArrayView1<'_, f64>, args: &[f64]) -> f64 {
    let t = threshold(args);
    indicator(v.iter().any(|&x| x > t))
}

/// v(x) = x.
pub fn identity(v: ArrayView1<'_, f64>, _: &[f64]) -> Array1<f64> {
    v.to_owned()
}

/// Componentwise max(x, `args[0]`).
pub fn max_with(v: ArrayView1<'_, f64>, args: &[f64]) -> Array1<f64> {
    let t = threshold(args);
    v.mapv(|x| x.max(t))
}

/// Componentwise min(x, `args[0]`).
pub fn min_with(v: ArrayView1<'_, f64>, args: &[f64]) -> Array1<f64> {
    let t = threshold(args);
    v.mapv(|x| x.min(t))
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn indicators() {
        let v = array![0.3, 0.9];
        assert_eq!(all_above(v.view(), &[0.2]), 1.0);
        assert_eq!(all_above(v.view(), &[0.5]), 0.0);
        assert_eq!(any_above(v.view(), &[0.5]), 1.0);
        assert_eq!(all_below(v.view(), &[1.0]), 1.0);
        assert_eq!(all_below(v.view(), &[0.5]), 0.0);
        assert_eq!(ones(v.view(), &[]), 1.0);
    }

    #[test]
    fn thresholds_are_strict() {
        let v = array![0.2];
        assert_eq!(all_above(v.view(), &[0.2]), 0.0);
        assert_eq!(all_below(v.view(), &[0.2]), 0.0);
    }

    #[test]
    fn transforms() {
        let v = array![-1.0, 0.5, 2.0];
        assert_eq!(max_with(v.view(), &[0.0]), array![0.0, 0.5, 2.0]);
        assert_eq!(min_with(v.view(), &[1.0]), array![-1.0, 0.5, 1.0]);
        assert_eq!(identity(v.view(), &[]), v);
    }

    #[test]
    fn missing_threshold_defaults_to_zero() {
        assert_eq!(all_above(array![0.1].view(), &[]), 1.0);
    }
}
