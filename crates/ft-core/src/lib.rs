//! ft-core: shared foundation for fluidtab.
//!
//! Scalar checks, grid helpers and uom unit aliases used by the fluid models
//! and the property tables, plus the setup timers behind `--timing`.

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
