//! ft-fluids: slow fluid property models for fluidtab.
//!
//! Provides:
//! - `SinglePhaseFluid`, the property capability every model (and the
//!   tabulated facade) implements, in terms of pressure and temperature
//! - Species reference data
//! - Ideal gas and van der Waals models
//! - CoolProp backend (feature `coolprop`)
//!
//! # Example
//!
//! ```
//! use ft_fluids::{IdealGas, SinglePhaseFluid, Species};
//!
//! let n2 = IdealGas::from_species(Species::N2);
//! let rho = n2.rho(101_325.0, 300.0).unwrap();
//! assert!(rho > 1.0 && rho < 1.3);
//! ```

#[cfg(feature = "coolprop")]
pub mod coolprop;
pub mod error;
pub mod henry;
pub mod ideal_gas;
pub mod model;
pub mod species;
pub mod van_der_waals;

// Re-exports for ergonomics
#[cfg(feature = "coolprop")]
pub use coolprop::CoolPropModel;
pub use error::{FluidError, FluidResult};
pub use ideal_gas::{IdealGas, Sutherland};
pub use model::{HenryDerivs, PropertyDerivs, SinglePhaseFluid, ViscosityDerivs};
pub use species::{HenryCoefficients, Species, SpeciesData};
pub use van_der_waals::VanDerWaalsFluid;
