//! Fluid property errors.

use ft_core::CoreError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Failures of a slow fluid model, or of a table query standing in for one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// A non-positive or non-finite pressure, temperature or density.
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Value outside the valid domain, e.g. a query outside a tabulated range.
    #[error("{what} {value} is out of range [{min}, {max}]")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The model has no correlation for this property.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// CoolProp rejected the state or failed internally.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// The density iteration of a cubic equation of state did not settle.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },
}

impl From<CoreError> for FluidError {
    fn from(err: CoreError) -> Self {
        FluidError::NonPhysical { what: err.what() }
    }
}
