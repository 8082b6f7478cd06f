//! Error types for table construction.

use crate::axis::AxisError;
use crate::matrix::ShapeError;
use ft_fluids::FluidError;
use std::path::PathBuf;
use thiserror::Error;

pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while building, reading or writing a property table.
///
/// Out-of-range queries against a ready table are reported as
/// [`FluidError::OutOfRange`], since the table answers through the same
/// interface as the model it replaces.
#[derive(Error, Debug)]
pub enum TableError {
    /// Malformed table file. `line` is 1-based; 0 when no single line is at fault.
    #[error("Format error{}: {message}", line_label(.line))]
    Format { line: usize, message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {what}")]
    Config { what: String },

    #[error("Axis error: {0}")]
    Axis(#[from] AxisError),

    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        TableError::Format {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            source,
        }
    }
}

fn line_label(line: &usize) -> String {
    if *line == 0 {
        String::new()
    } else {
        format!(" at line {line}")
    }
}
