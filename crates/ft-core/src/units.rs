//! Typed SI quantities for the state-point API.
//!
//! Tables and models work in raw `Real` SI values; these aliases are used
//! where a caller hands in or gets back a whole state.

use uom::si::f64::{MassDensity, Pressure as UomPressure, ThermodynamicTemperature};
use uom::si::mass_density::kilogram_per_cubic_meter;
use uom::si::pressure::pascal;
use uom::si::thermodynamic_temperature::kelvin;

pub type Density = MassDensity;
pub type Pressure = UomPressure;
pub type Temperature = ThermodynamicTemperature;

pub fn pa(value: f64) -> Pressure {
    Pressure::new::<pascal>(value)
}

pub fn k(value: f64) -> Temperature {
    Temperature::new::<kelvin>(value)
}

pub fn kg_per_m3(value: f64) -> Density {
    Density::new::<kilogram_per_cubic_meter>(value)
}

pub mod constants {
    /// Universal gas constant [J/(mol·K)]
    pub const R_UNIVERSAL: f64 = 8.314_462_618;
}
