//! ft-table: tabulated fluid properties.
//!
//! A slow [`SinglePhaseFluid`] is sampled once on a pressure-temperature grid
//! (or a table file is loaded), and density, internal energy and enthalpy are
//! then answered by bicubic interpolation. Everything else passes through to
//! the slow model.
//!
//! # Example
//!
//! ```
//! use ft_fluids::{IdealGas, SinglePhaseFluid, Species};
//! use ft_table::{TableConfig, TabulatedFluidProperties};
//!
//! let gas = IdealGas::from_species(Species::N2);
//! let config = TableConfig {
//!     pressure_min: 1e5,
//!     pressure_max: 1e6,
//!     num_p: 10,
//!     num_t: 10,
//!     ..TableConfig::default()
//! };
//! let table = TabulatedFluidProperties::initial_setup(&config, &gas).unwrap();
//! let rho = table.rho(5e5, 350.0).unwrap();
//! assert!((rho - gas.rho(5e5, 350.0).unwrap()).abs() < 1e-4 * rho);
//! assert!(table.rho(2e6, 350.0).is_err());
//! ```

pub mod axis;
pub mod bicubic;
pub mod codec;
pub mod config;
pub mod error;
pub mod generator;
pub mod matrix;
pub mod property;
pub mod spline;
pub mod table;
pub mod tabulated;

pub use axis::{Axis, AxisError};
pub use bicubic::{BicubicSpline, BoundaryDerivatives};
pub use config::{TableConfig, load_config};
pub use error::{TableError, TableResult};
pub use ft_fluids::SinglePhaseFluid;
pub use matrix::{PropertyMatrix, ShapeError};
pub use property::{PropertyMap, PropertySet, TabulatedProperty};
pub use table::TableData;
pub use tabulated::{SetupMode, TableBounds, TabulatedFluidProperties, ThermoPropertyPack};
