//! One-dimensional cubic splines.
//!
//! Used to estimate first derivatives at grid nodes before the bicubic
//! patches are assembled.

use crate::axis::Axis;
use crate::matrix::ShapeError;
use ft_core::Real;

/// End condition for one side of a cubic spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndCondition {
    /// Zero second derivative.
    Natural,
    /// Prescribed first derivative.
    Clamped(Real),
}

/// Interpolating cubic spline through `(x_i, y_i)`.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<Real>,
    ys: Vec<Real>,
    /// Second derivatives at the knots.
    y2s: Vec<Real>,
}

impl CubicSpline {
    pub fn new(
        xs: &Axis,
        ys: &[Real],
        lower: EndCondition,
        upper: EndCondition,
    ) -> Result<Self, ShapeError> {
        let n = xs.len();
        if ys.len() != n {
            return Err(ShapeError {
                rows: 1,
                cols: n,
                expected: n,
                found: ys.len(),
            });
        }
        let x = xs.values();
        let y = ys;
        let mut y2 = vec![0.0; n];
        let mut u = vec![0.0; n];

        if let EndCondition::Clamped(slope) = lower {
            let h = x[1] - x[0];
            y2[0] = -0.5;
            u[0] = (3.0 / h) * ((y[1] - y[0]) / h - slope);
        }

        // Forward sweep of the tridiagonal system
        for i in 1..n - 1 {
            let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
            let p = sig * y2[i - 1] + 2.0;
            y2[i] = (sig - 1.0) / p;
            let d = (y[i + 1] - y[i]) / (x[i + 1] - x[i]) - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
            u[i] = (6.0 * d / (x[i + 1] - x[i - 1]) - sig * u[i - 1]) / p;
        }

        let (qn, un) = match upper {
            EndCondition::Natural => (0.0, 0.0),
            EndCondition::Clamped(slope) => {
                let h = x[n - 1] - x[n - 2];
                (0.5, (3.0 / h) * (slope - (y[n - 1] - y[n - 2]) / h))
            }
        };
        y2[n - 1] = (un - qn * u[n - 2]) / (qn * y2[n - 2] + 1.0);

        for k in (0..n - 1).rev() {
            y2[k] = y2[k] * y2[k + 1] + u[k];
        }

        Ok(Self {
            xs: x.to_vec(),
            ys: y.to_vec(),
            y2s: y2,
        })
    }

    /// Spline with zero curvature at both ends.
    pub fn natural(xs: &Axis, ys: &[Real]) -> Result<Self, ShapeError> {
        Self::new(xs, ys, EndCondition::Natural, EndCondition::Natural)
    }

    /// Value and first derivative at `x`. Outside the knots the end cubic is extended.
    pub fn evaluate(&self, x: Real) -> (Real, Real) {
        let n = self.xs.len();
        let hi = self.xs.partition_point(|&v| v <= x).clamp(1, n - 1);
        let lo = hi - 1;
        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;
        let (y_lo, y_hi) = (self.ys[lo], self.ys[hi]);
        let (c_lo, c_hi) = (self.y2s[lo], self.y2s[hi]);

        let value =
            a * y_lo + b * y_hi + ((a * a * a - a) * c_lo + (b * b * b - b) * c_hi) * h * h / 6.0;
        let slope = (y_hi - y_lo) / h - (3.0 * a * a - 1.0) / 6.0 * h * c_lo
            + (3.0 * b * b - 1.0) / 6.0 * h * c_hi;
        (value, slope)
    }

    /// First derivative at every knot.
    pub fn node_slopes(&self) -> Vec<Real> {
        let n = self.xs.len();
        let mut slopes = Vec::with_capacity(n);
        for i in 0..n - 1 {
            let h = self.xs[i + 1] - self.xs[i];
            slopes.push(
                (self.ys[i + 1] - self.ys[i]) / h - h * (2.0 * self.y2s[i] + self.y2s[i + 1]) / 6.0,
            );
        }
        let h = self.xs[n - 1] - self.xs[n - 2];
        let (y_a, y_b) = (self.ys[n - 2], self.ys[n - 1]);
        slopes.push((y_b - y_a) / h + h * (self.y2s[n - 2] + 2.0 * self.y2s[n - 1]) / 6.0);
        slopes
    }

    pub fn second_derivatives(&self) -> &[Real] {
        &self.y2s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn axis(values: &[Real]) -> Axis {
        Axis::new(values.to_vec()).unwrap()
    }

    #[test]
    fn natural_spline_reproduces_lines() {
        let xs = axis(&[0.0, 1.0, 2.5, 4.0]);
        let ys: Vec<Real> = xs.values().iter().map(|x| 3.0 * x - 1.0).collect();
        let spline = CubicSpline::natural(&xs, &ys).unwrap();
        for x in [0.3, 1.7, 3.9] {
            let (v, d) = spline.evaluate(x);
            assert!((v - (3.0 * x - 1.0)).abs() < 1e-12);
            assert!((d - 3.0).abs() < 1e-12);
        }
        for s in spline.node_slopes() {
            assert!((s - 3.0).abs() < 1e-12);
        }
        assert!(spline.second_derivatives().iter().all(|c| c.abs() < 1e-12));
    }

    #[test]
    fn clamped_spline_reproduces_cubics() {
        // f = x^3 - 2x, f' = 3x^2 - 2
        let f = |x: Real| x * x * x - 2.0 * x;
        let df = |x: Real| 3.0 * x * x - 2.0;
        let xs = axis(&[-1.0, 0.0, 0.5, 1.5, 2.0]);
        let ys: Vec<Real> = xs.values().iter().map(|&x| f(x)).collect();
        let spline = CubicSpline::new(
            &xs,
            &ys,
            EndCondition::Clamped(df(-1.0)),
            EndCondition::Clamped(df(2.0)),
        )
        .unwrap();
        for x in [-0.7, 0.2, 1.0, 1.9] {
            let (v, d) = spline.evaluate(x);
            assert!((v - f(x)).abs() < 1e-10, "f({x})");
            assert!((d - df(x)).abs() < 1e-10, "f'({x})");
        }
        for (&x, s) in xs.values().iter().zip(spline.node_slopes()) {
            assert!((s - df(x)).abs() < 1e-10);
        }
    }

    #[test]
    fn two_point_clamped_spline() {
        let xs = axis(&[0.0, 1.0]);
        let flat = EndCondition::Clamped(0.0);
        let spline = CubicSpline::new(&xs, &[0.0, 1.0], flat, flat).unwrap();
        let slopes = spline.node_slopes();
        assert!(slopes[0].abs() < 1e-12);
        assert!(slopes[1].abs() < 1e-12);
        let (v, _) = spline.evaluate(0.5);
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn length_mismatch() {
        let xs = axis(&[0.0, 1.0, 2.0]);
        assert!(CubicSpline::natural(&xs, &[1.0, 2.0]).is_err());
    }

    proptest! {
        #[test]
        fn passes_through_knots(ys in prop::collection::vec(-1e3f64..1e3, 6)) {
            let xs = axis(&[0.0, 0.5, 1.5, 2.0, 3.5, 4.0]);
            let spline = CubicSpline::natural(&xs, &ys).unwrap();
            for (&x, &y) in xs.values().iter().zip(&ys) {
                let (v, _) = spline.evaluate(x);
                prop_assert!((v - y).abs() <= 1e-9 * (1.0 + y.abs()));
            }
        }
    }
}
