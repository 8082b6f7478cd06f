use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Scalar checks shared by the fluid models and the table grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("{what} is not finite ({value})")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },
}

impl CoreError {
    /// Name of the offending quantity.
    pub fn what(&self) -> &'static str {
        match self {
            Self::NonFinite { what, .. } | Self::NonPositive { what, .. } => what,
        }
    }
}
