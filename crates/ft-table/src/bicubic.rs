//! Bicubic Hermite interpolation over a (pressure, temperature) grid.
//!
//! Node derivatives are estimated once at construction:
//!
//! ```text
//! f_p  : cubic spline along each temperature row (clamped by dp boundary data)
//! f_T  : cubic spline along each pressure column (clamped by dT boundary data)
//! f_pT : spline along p of each f_T row, clamped by edge cross-slopes
//! ```
//!
//! A query then evaluates the tensor-product Hermite patch of its cell, which
//! gives value and both partial derivatives from the same polynomial and
//! reproduces the tabulated value at every node.

use crate::axis::Axis;
use crate::error::{TableError, TableResult};
use crate::matrix::{PropertyMatrix, ShapeError};
use crate::spline::{CubicSpline, EndCondition};
use ft_core::Real;
use ft_fluids::PropertyDerivs;

/// Derivatives prescribed on the four edges of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryDerivatives {
    /// `df/dp` at `p_min`, one per temperature.
    pub dp_low: Vec<Real>,
    /// `df/dp` at `p_max`, one per temperature.
    pub dp_high: Vec<Real>,
    /// `df/dT` at `T_min`, one per pressure.
    pub dt_low: Vec<Real>,
    /// `df/dT` at `T_max`, one per pressure.
    pub dt_high: Vec<Real>,
}

impl BoundaryDerivatives {
    fn check(&self, num_p: usize, num_t: usize) -> Result<(), ShapeError> {
        for (values, n) in [
            (&self.dp_low, num_t),
            (&self.dp_high, num_t),
            (&self.dt_low, num_p),
            (&self.dt_high, num_p),
        ] {
            if values.len() != n {
                return Err(ShapeError {
                    rows: 1,
                    cols: n,
                    expected: n,
                    found: values.len(),
                });
            }
        }
        Ok(())
    }
}

/// Precomputed bicubic interpolant for one property.
#[derive(Debug, Clone)]
pub struct BicubicSpline {
    pressure: Axis,
    temperature: Axis,
    f: PropertyMatrix,
    f_p: Vec<Real>,
    f_t: Vec<Real>,
    f_pt: Vec<Real>,
}

/// Hermite basis weights along one direction of a cell.
struct Basis {
    /// Weights of the node values.
    value: [Real; 2],
    /// Weights of the node slopes, scaled by the cell width.
    slope: [Real; 2],
    /// Derivatives of `value` with respect to the coordinate.
    d_value: [Real; 2],
    /// Derivatives of `slope` with respect to the coordinate.
    d_slope: [Real; 2],
}

impl Basis {
    fn new(s: Real, h: Real) -> Self {
        let s2 = s * s;
        let s3 = s2 * s;
        Self {
            value: [2.0 * s3 - 3.0 * s2 + 1.0, -2.0 * s3 + 3.0 * s2],
            slope: [(s3 - 2.0 * s2 + s) * h, (s3 - s2) * h],
            d_value: [(6.0 * s2 - 6.0 * s) / h, (-6.0 * s2 + 6.0 * s) / h],
            d_slope: [3.0 * s2 - 4.0 * s + 1.0, 3.0 * s2 - 2.0 * s],
        }
    }
}

/// `d2f/dp dT` at every node, splining the `f_T` rows along p.
///
/// With boundary data the row splines are clamped by edge cross-slopes,
/// themselves splined along T from `dp_low`/`dp_high` and clamped at the four
/// corners. Rows and columns then describe one tensor-product spline, so the
/// Hermite patches join with continuous second derivatives.
fn cross_slopes(
    pressure: &Axis,
    temperature: &Axis,
    f_t: &[Real],
    boundary: Option<&BoundaryDerivatives>,
) -> Result<Vec<Real>, ShapeError> {
    let (num_p, num_t) = (pressure.len(), temperature.len());
    let (low, high): (Vec<Option<Real>>, Vec<Option<Real>>) = match boundary {
        None => (vec![None; num_t], vec![None; num_t]),
        Some(b) => {
            let along_t_low = CubicSpline::natural(temperature, &b.dp_low)?.node_slopes();
            let along_t_high = CubicSpline::natural(temperature, &b.dp_high)?.node_slopes();
            let along_p_low = CubicSpline::natural(pressure, &b.dt_low)?.node_slopes();
            let along_p_high = CubicSpline::natural(pressure, &b.dt_high)?.node_slopes();
            let (last_p, last_t) = (num_p - 1, num_t - 1);
            let corner =
                |along_t: Real, along_p: Real| EndCondition::Clamped(0.5 * (along_t + along_p));

            let edge = |dp: &[Real], first: EndCondition, last: EndCondition| {
                CubicSpline::new(temperature, dp, first, last).map(|s| s.node_slopes())
            };
            let low = edge(
                &b.dp_low,
                corner(along_t_low[0], along_p_low[0]),
                corner(along_t_low[last_t], along_p_high[0]),
            )?;
            let high = edge(
                &b.dp_high,
                corner(along_t_high[0], along_p_low[last_p]),
                corner(along_t_high[last_t], along_p_high[last_p]),
            )?;
            (
                low.into_iter().map(Some).collect(),
                high.into_iter().map(Some).collect(),
            )
        }
    };

    let end = |slope: Option<Real>| slope.map_or(EndCondition::Natural, EndCondition::Clamped);
    let mut f_pt = Vec::with_capacity(num_t * num_p);
    for (i, row) in f_t.chunks(num_p).enumerate() {
        let spline = CubicSpline::new(pressure, row, end(low[i]), end(high[i]))?;
        f_pt.extend(spline.node_slopes());
    }
    Ok(f_pt)
}

impl BicubicSpline {
    /// Build the interpolant for `values` on the given axes.
    ///
    /// Without `boundary`, edge derivatives fall back to natural splines.
    pub fn new(
        pressure: Axis,
        temperature: Axis,
        values: PropertyMatrix,
        boundary: Option<&BoundaryDerivatives>,
    ) -> TableResult<Self> {
        let (num_p, num_t) = (pressure.len(), temperature.len());
        if values.num_p() != num_p || values.num_t() != num_t {
            return Err(TableError::Shape(ShapeError {
                rows: num_t,
                cols: num_p,
                expected: num_t * num_p,
                found: values.num_t() * values.num_p(),
            }));
        }
        if let Some(b) = boundary {
            b.check(num_p, num_t)?;
        }
        let end = |side: Option<&Vec<Real>>, i: usize| {
            side.map_or(EndCondition::Natural, |d| EndCondition::Clamped(d[i]))
        };

        let mut f_p = vec![0.0; num_t * num_p];
        for i in 0..num_t {
            let spline = CubicSpline::new(
                &pressure,
                values.row(i),
                end(boundary.map(|b| &b.dp_low), i),
                end(boundary.map(|b| &b.dp_high), i),
            )?;
            f_p[i * num_p..(i + 1) * num_p].copy_from_slice(&spline.node_slopes());
        }

        let mut f_t = vec![0.0; num_t * num_p];
        for j in 0..num_p {
            let spline = CubicSpline::new(
                &temperature,
                &values.column(j),
                end(boundary.map(|b| &b.dt_low), j),
                end(boundary.map(|b| &b.dt_high), j),
            )?;
            for (i, slope) in spline.node_slopes().into_iter().enumerate() {
                f_t[i * num_p + j] = slope;
            }
        }

        let f_pt = cross_slopes(&pressure, &temperature, &f_t, boundary)?;

        Ok(Self {
            pressure,
            temperature,
            f: values,
            f_p,
            f_t,
            f_pt,
        })
    }

    pub fn pressure(&self) -> &Axis {
        &self.pressure
    }

    pub fn temperature(&self) -> &Axis {
        &self.temperature
    }

    pub fn values(&self) -> &PropertyMatrix {
        &self.f
    }

    /// Interpolated value at `(p, T)`.
    pub fn value(&self, p: Real, t: Real) -> Real {
        self.evaluate(p, t).value
    }

    /// Interpolated value with `d/dp` and `d/dT` at `(p, T)`.
    ///
    /// Points outside the grid extrapolate the nearest edge patch; range
    /// checks belong to the caller.
    pub fn evaluate(&self, p: Real, t: Real) -> PropertyDerivs {
        let j = self.pressure.cell(p);
        let i = self.temperature.cell(t);
        let hp = self.pressure.spacing(j);
        let ht = self.temperature.spacing(i);
        let bp = Basis::new((p - self.pressure.values()[j]) / hp, hp);
        let bt = Basis::new((t - self.temperature.values()[i]) / ht, ht);

        let num_p = self.pressure.len();
        let mut out = PropertyDerivs::new(0.0, 0.0, 0.0);
        for l in 0..2 {
            for k in 0..2 {
                let idx = (i + l) * num_p + (j + k);
                let f = self.f.as_flat()[idx];
                let (fp, ft, fpt) = (self.f_p[idx], self.f_t[idx], self.f_pt[idx]);

                out.value += (f * bp.value[k] + fp * bp.slope[k]) * bt.value[l]
                    + (ft * bp.value[k] + fpt * bp.slope[k]) * bt.slope[l];
                out.d_dp += (f * bp.d_value[k] + fp * bp.d_slope[k]) * bt.value[l]
                    + (ft * bp.d_value[k] + fpt * bp.d_slope[k]) * bt.slope[l];
                out.d_dt += (f * bp.value[k] + fp * bp.slope[k]) * bt.d_value[l]
                    + (ft * bp.value[k] + fpt * bp.slope[k]) * bt.d_slope[l];
            }
        }
        out
    }
}
