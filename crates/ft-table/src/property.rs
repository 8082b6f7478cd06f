//! The tabulated properties and per-property containers.

use std::fmt;

/// A property stored in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabulatedProperty {
    Density,
    InternalEnergy,
    Enthalpy,
}

impl TabulatedProperty {
    /// All tabulated properties, in file order.
    pub const ALL: [TabulatedProperty; 3] = [
        TabulatedProperty::Density,
        TabulatedProperty::InternalEnergy,
        TabulatedProperty::Enthalpy,
    ];

    /// Keyword heading this property's block in a table file.
    pub fn keyword(self) -> &'static str {
        match self {
            TabulatedProperty::Density => "density",
            TabulatedProperty::InternalEnergy => "internal_energy",
            TabulatedProperty::Enthalpy => "enthalpy",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    pub fn units(self) -> &'static str {
        match self {
            TabulatedProperty::Density => "kg/m^3",
            TabulatedProperty::InternalEnergy | TabulatedProperty::Enthalpy => "J/kg",
        }
    }
}

impl fmt::Display for TabulatedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One optional slot per tabulated property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMap<T> {
    density: Option<T>,
    internal_energy: Option<T>,
    enthalpy: Option<T>,
}

impl<T> Default for PropertyMap<T> {
    fn default() -> Self {
        Self {
            density: None,
            internal_energy: None,
            enthalpy: None,
        }
    }
}

impl<T> PropertyMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, prop: TabulatedProperty) -> &Option<T> {
        match prop {
            TabulatedProperty::Density => &self.density,
            TabulatedProperty::InternalEnergy => &self.internal_energy,
            TabulatedProperty::Enthalpy => &self.enthalpy,
        }
    }

    fn slot_mut(&mut self, prop: TabulatedProperty) -> &mut Option<T> {
        match prop {
            TabulatedProperty::Density => &mut self.density,
            TabulatedProperty::InternalEnergy => &mut self.internal_energy,
            TabulatedProperty::Enthalpy => &mut self.enthalpy,
        }
    }

    pub fn get(&self, prop: TabulatedProperty) -> Option<&T> {
        self.slot(prop).as_ref()
    }

    /// Store a value, returning the previous one.
    pub fn insert(&mut self, prop: TabulatedProperty, value: T) -> Option<T> {
        self.slot_mut(prop).replace(value)
    }

    pub fn contains(&self, prop: TabulatedProperty) -> bool {
        self.slot(prop).is_some()
    }

    /// Properties without a value, in file order.
    pub fn missing(&self) -> Vec<TabulatedProperty> {
        TabulatedProperty::ALL
            .into_iter()
            .filter(|&p| !self.contains(p))
            .collect()
    }

    /// Present entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (TabulatedProperty, &T)> {
        TabulatedProperty::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p, v)))
    }

    /// Convert to a [`PropertySet`] when every slot is filled.
    pub fn complete(self) -> Result<PropertySet<T>, Vec<TabulatedProperty>> {
        let missing = self.missing();
        match (self.density, self.internal_energy, self.enthalpy) {
            (Some(density), Some(internal_energy), Some(enthalpy)) => Ok(PropertySet {
                density,
                internal_energy,
                enthalpy,
            }),
            _ => Err(missing),
        }
    }
}

/// A value for every tabulated property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySet<T> {
    pub density: T,
    pub internal_energy: T,
    pub enthalpy: T,
}

impl<T> PropertySet<T> {
    pub fn get(&self, prop: TabulatedProperty) -> &T {
        match prop {
            TabulatedProperty::Density => &self.density,
            TabulatedProperty::InternalEnergy => &self.internal_energy,
            TabulatedProperty::Enthalpy => &self.enthalpy,
        }
    }

    /// Build each entry with a fallible constructor, in file order.
    pub fn try_build<E>(mut f: impl FnMut(TabulatedProperty) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            density: f(TabulatedProperty::Density)?,
            internal_energy: f(TabulatedProperty::InternalEnergy)?,
            enthalpy: f(TabulatedProperty::Enthalpy)?,
        })
    }
}
