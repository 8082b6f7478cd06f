//! Strictly increasing grid coordinates.

use ft_core::{Real, first_non_increasing, linspace};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AxisError {
    #[error("axis needs at least 2 points, got {len}")]
    TooShort { len: usize },

    #[error("axis value {value} at index {index} is not finite")]
    NonFinite { index: usize, value: Real },

    #[error("axis value {value} at index {index} is not above its predecessor")]
    NotIncreasing { index: usize, value: Real },
}

/// Ordered grid coordinates for one table dimension.
///
/// An `Axis` always holds at least two finite, strictly increasing values,
/// so every point inside `[min, max]` falls in exactly one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis(Vec<Real>);

impl Axis {
    pub fn new(values: Vec<Real>) -> Result<Self, AxisError> {
        if values.len() < 2 {
            return Err(AxisError::TooShort { len: values.len() });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(AxisError::NonFinite {
                index,
                value: values[index],
            });
        }
        if let Some(index) = first_non_increasing(&values) {
            return Err(AxisError::NotIncreasing {
                index,
                value: values[index],
            });
        }
        Ok(Self(values))
    }

    /// `n` evenly spaced points from `min` to `max`, both included.
    pub fn linspace(min: Real, max: Real, n: usize) -> Result<Self, AxisError> {
        Self::new(linspace(min, max, n))
    }

    pub fn values(&self) -> &[Real] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn min(&self) -> Real {
        self.0[0]
    }

    pub fn max(&self) -> Real {
        self.0[self.0.len() - 1]
    }

    pub fn contains(&self, x: Real) -> bool {
        x >= self.min() && x <= self.max()
    }

    /// Index `i` of the cell `[x_i, x_{i+1}]` holding `x`.
    ///
    /// Interior nodes open the cell to their right; `max` belongs to the last
    /// cell. Values outside the axis clamp to the first or last cell.
    pub fn cell(&self, x: Real) -> usize {
        let upper = self.0.partition_point(|&v| v <= x);
        upper.saturating_sub(1).min(self.0.len() - 2)
    }

    /// Width of cell `i`.
    pub fn spacing(&self, i: usize) -> Real {
        self.0[i + 1] - self.0[i]
    }
}

impl AsRef<[Real]> for Axis {
    fn as_ref(&self) -> &[Real] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_short_axes() {
        assert_eq!(Axis::new(vec![]), Err(AxisError::TooShort { len: 0 }));
        assert_eq!(Axis::new(vec![1.0]), Err(AxisError::TooShort { len: 1 }));
    }

    #[test]
    fn rejects_repeated_and_decreasing_values() {
        assert_eq!(
            Axis::new(vec![1.0, 2.0, 2.0]),
            Err(AxisError::NotIncreasing {
                index: 2,
                value: 2.0
            })
        );
        assert!(matches!(
            Axis::new(vec![3.0, 1.0]),
            Err(AxisError::NotIncreasing { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(matches!(
            Axis::new(vec![1.0, Real::NAN, 3.0]),
            Err(AxisError::NonFinite { index: 1, .. })
        ));
        assert!(matches!(
            Axis::new(vec![Real::NEG_INFINITY, 0.0]),
            Err(AxisError::NonFinite { index: 0, .. })
        ));
    }

    #[test]
    fn linspace_hits_both_bounds() {
        let axis = Axis::linspace(1e5, 3e5, 3).unwrap();
        assert_eq!(axis.values(), &[1e5, 2e5, 3e5]);
        assert_eq!(axis.min(), 1e5);
        assert_eq!(axis.max(), 3e5);
        assert!(Axis::linspace(1.0, 1.0, 4).is_err());
    }

    #[test]
    fn cell_lookup() {
        let axis = Axis::new(vec![0.0, 1.0, 3.0, 6.0]).unwrap();
        assert_eq!(axis.cell(0.0), 0);
        assert_eq!(axis.cell(0.5), 0);
        assert_eq!(axis.cell(1.0), 1);
        assert_eq!(axis.cell(2.9), 1);
        assert_eq!(axis.cell(3.0), 2);
        assert_eq!(axis.cell(6.0), 2);
        assert_eq!(axis.cell(-1.0), 0);
        assert_eq!(axis.cell(7.0), 2);
        assert_eq!(axis.spacing(2), 3.0);
    }

    #[test]
    fn contains_is_inclusive() {
        let axis = Axis::new(vec![300.0, 400.0]).unwrap();
        assert!(axis.contains(300.0));
        assert!(axis.contains(400.0));
        assert!(!axis.contains(299.999));
        assert!(!axis.contains(Real::NAN));
    }

    proptest! {
        #[test]
        fn linspace_axes_are_increasing(
            min in -1e6f64..1e6,
            width in 1e-3f64..1e6,
            n in 2usize..200,
        ) {
            let axis = Axis::linspace(min, min + width, n).unwrap();
            prop_assert_eq!(axis.len(), n);
            prop_assert!(axis.values().windows(2).all(|w| w[1] > w[0]));
        }

        #[test]
        fn cell_brackets_point(x in 0.0f64..10.0) {
            let axis = Axis::linspace(0.0, 10.0, 11).unwrap();
            let i = axis.cell(x);
            prop_assert!(axis.values()[i] <= x && x <= axis.values()[i + 1]);
        }
    }
}
