//! Dense property values over the (temperature, pressure) grid.

use ft_core::Real;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("expected {expected} values for a {rows} x {cols} grid, found {found}")]
pub struct ShapeError {
    pub rows: usize,
    pub cols: usize,
    pub expected: usize,
    pub found: usize,
}

/// Property values with one row per temperature and one column per pressure.
///
/// Storage is row-major, so the flat layout has pressure varying fastest,
/// which is also the order values appear in a table file.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMatrix {
    num_t: usize,
    num_p: usize,
    data: Vec<Real>,
}

impl PropertyMatrix {
    pub fn from_flat(num_t: usize, num_p: usize, data: Vec<Real>) -> Result<Self, ShapeError> {
        let expected = num_t * num_p;
        if data.len() != expected {
            return Err(ShapeError {
                rows: num_t,
                cols: num_p,
                expected,
                found: data.len(),
            });
        }
        Ok(Self { num_t, num_p, data })
    }

    /// Build from nested rows (one `Vec` per temperature).
    pub fn from_rows(rows: Vec<Vec<Real>>) -> Result<Self, ShapeError> {
        let num_t = rows.len();
        let num_p = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(num_t * num_p);
        for row in rows {
            if row.len() != num_p {
                return Err(ShapeError {
                    rows: num_t,
                    cols: num_p,
                    expected: num_t * num_p,
                    found: data.len() + row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { num_t, num_p, data })
    }

    /// Fill the grid by calling `f(i_t, i_p)` in storage order.
    pub fn try_from_fn<E>(
        num_t: usize,
        num_p: usize,
        mut f: impl FnMut(usize, usize) -> Result<Real, E>,
    ) -> Result<Self, E> {
        let mut data = Vec::with_capacity(num_t * num_p);
        for i in 0..num_t {
            for j in 0..num_p {
                data.push(f(i, j)?);
            }
        }
        Ok(Self { num_t, num_p, data })
    }

    pub fn num_t(&self) -> usize {
        self.num_t
    }

    pub fn num_p(&self) -> usize {
        self.num_p
    }

    pub fn get(&self, i_t: usize, i_p: usize) -> Real {
        self.data[i_t * self.num_p + i_p]
    }

    /// Values along pressure at temperature index `i_t`.
    pub fn row(&self, i_t: usize) -> &[Real] {
        &self.data[i_t * self.num_p..(i_t + 1) * self.num_p]
    }

    /// Values along temperature at pressure index `i_p`.
    pub fn column(&self, i_p: usize) -> Vec<Real> {
        self.data
            .iter()
            .skip(i_p)
            .step_by(self.num_p)
            .copied()
            .collect()
    }

    pub fn as_flat(&self) -> &[Real] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<Real>> {
        self.data.chunks(self.num_p).map(<[Real]>::to_vec).collect()
    }
}
