//! In-memory table: the two axes plus whichever property matrices are present.

use crate::axis::Axis;
use crate::error::TableResult;
use crate::matrix::{PropertyMatrix, ShapeError};
use crate::property::{PropertyMap, TabulatedProperty};

#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pressure: Axis,
    temperature: Axis,
    properties: PropertyMap<PropertyMatrix>,
}

impl TableData {
    /// A table with axes only.
    pub fn new(pressure: Axis, temperature: Axis) -> Self {
        Self {
            pressure,
            temperature,
            properties: PropertyMap::new(),
        }
    }

    pub fn pressure(&self) -> &Axis {
        &self.pressure
    }

    pub fn temperature(&self) -> &Axis {
        &self.temperature
    }

    pub fn num_p(&self) -> usize {
        self.pressure.len()
    }

    pub fn num_t(&self) -> usize {
        self.temperature.len()
    }

    pub fn property(&self, prop: TabulatedProperty) -> Option<&PropertyMatrix> {
        self.properties.get(prop)
    }

    pub fn properties(&self) -> &PropertyMap<PropertyMatrix> {
        &self.properties
    }

    /// Tabulated properties without a matrix.
    pub fn missing(&self) -> Vec<TabulatedProperty> {
        self.properties.missing()
    }

    /// Store a matrix for `prop`. The matrix must match the axes.
    pub fn set_property(
        &mut self,
        prop: TabulatedProperty,
        matrix: PropertyMatrix,
    ) -> TableResult<()> {
        if matrix.num_t() != self.num_t() || matrix.num_p() != self.num_p() {
            return Err(ShapeError {
                rows: self.num_t(),
                cols: self.num_p(),
                expected: self.num_t() * self.num_p(),
                found: matrix.num_t() * matrix.num_p(),
            }
            .into());
        }
        self.properties.insert(prop, matrix);
        Ok(())
    }

    pub fn into_parts(self) -> (Axis, Axis, PropertyMap<PropertyMatrix>) {
        (self.pressure, self.temperature, self.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;

    #[test]
    fn set_property_checks_shape() {
        let mut table = TableData::new(
            Axis::new(vec![1.0, 2.0, 3.0]).unwrap(),
            Axis::new(vec![10.0, 20.0]).unwrap(),
        );
        assert_eq!(table.missing().len(), 3);

        let good = PropertyMatrix::from_flat(2, 3, vec![0.0; 6]).unwrap();
        table.set_property(TabulatedProperty::Density, good).unwrap();
        assert!(table.property(TabulatedProperty::Density).is_some());

        let transposed = PropertyMatrix::from_flat(3, 2, vec![0.0; 6]).unwrap();
        assert!(matches!(
            table.set_property(TabulatedProperty::Enthalpy, transposed),
            Err(TableError::Shape(_))
        ));
        assert_eq!(
            table.missing(),
            vec![TabulatedProperty::InternalEnergy, TabulatedProperty::Enthalpy]
        );
    }
}
