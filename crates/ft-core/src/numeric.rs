use crate::{CoreError, CoreResult};

/// Scalar type for every property value, axis point and derivative.
pub type Real = f64;

/// Mixed absolute/relative comparison tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `true` when `a` and `b` agree within `tol.abs` or within `tol.rel` of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(value: Real, what: &'static str) -> CoreResult<Real> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::NonFinite { what, value })
    }
}

/// Finite and strictly positive, as pressures, temperatures and densities must be.
pub fn ensure_positive(value: Real, what: &'static str) -> CoreResult<Real> {
    ensure_finite(value, what)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::NonPositive { what, value })
    }
}

/// Index of the first element that is not strictly greater than its predecessor.
pub fn first_non_increasing(values: &[Real]) -> Option<usize> {
    values
        .windows(2)
        .position(|w| w[1] <= w[0] || w[1].is_nan())
        .map(|i| i + 1)
}

/// `n` evenly spaced points from `min` to `max` inclusive.
///
/// The last point is set to `max` exactly so that grid extrema match the requested bounds.
pub fn linspace(min: Real, max: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as Real;
            let mut out: Vec<Real> = (0..n).map(|i| min + i as Real * step).collect();
            out[n - 1] = max;
            out
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn linspace_is_strictly_increasing(
            min in -1e6_f64..1e6_f64,
            span in 1e-3_f64..1e6_f64,
            n in 2_usize..200,
        ) {
            let pts = linspace(min, min + span, n);
            prop_assert_eq!(pts.len(), n);
            prop_assert_eq!(first_non_increasing(&pts), None);
            prop_assert_eq!(pts[0], min);
            prop_assert_eq!(pts[n - 1], min + span);
        }
    }
}
