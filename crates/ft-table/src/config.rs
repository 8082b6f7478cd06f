//! Table configuration and YAML/JSON loading.

use crate::axis::Axis;
use crate::error::{TableError, TableResult};
use ft_core::Real;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Grid and cache-file settings for a tabulated fluid.
///
/// The ranges only matter when a table has to be generated from scratch;
/// a loaded file brings its own axes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Table file to read, complete, or create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// [Pa]
    pub pressure_min: Real,
    /// [Pa]
    pub pressure_max: Real,
    pub num_p: usize,
    /// [K]
    pub temperature_min: Real,
    /// [K]
    pub temperature_max: Real,
    pub num_t: usize,
    /// Pin grid-edge slopes to the slow model's derivatives.
    /// When false the interpolators use natural end conditions.
    pub clamp_boundaries: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            file: None,
            pressure_min: 1e5,
            pressure_max: 50e6,
            num_p: 100,
            temperature_min: 300.0,
            temperature_max: 500.0,
            num_t: 100,
            clamp_boundaries: true,
        }
    }
}

impl TableConfig {
    /// Load a config file and validate it.
    pub fn from_file(path: &Path) -> TableResult<Self> {
        let config: Self = load_config(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TableResult<()> {
        check_range("pressure", self.pressure_min, self.pressure_max, self.num_p)?;
        check_range(
            "temperature",
            self.temperature_min,
            self.temperature_max,
            self.num_t,
        )
    }

    pub fn pressure_axis(&self) -> TableResult<Axis> {
        Ok(Axis::linspace(self.pressure_min, self.pressure_max, self.num_p)?)
    }

    pub fn temperature_axis(&self) -> TableResult<Axis> {
        Ok(Axis::linspace(
            self.temperature_min,
            self.temperature_max,
            self.num_t,
        )?)
    }
}

fn check_range(name: &str, min: Real, max: Real, n: usize) -> TableResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(TableError::Config {
            what: format!("{name} bounds must be finite, got [{min}, {max}]"),
        });
    }
    if min >= max {
        return Err(TableError::Config {
            what: format!("{name}_min ({min}) must be below {name}_max ({max})"),
        });
    }
    if n < 2 {
        return Err(TableError::Config {
            what: format!("{name} point count must be at least 2, got {n}"),
        });
    }
    Ok(())
}

/// Deserialize a YAML (`.yaml`, `.yml`) or JSON (`.json`) file.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> TableResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
        Some("json") => Ok(serde_json::from_str(&content)?),
        _ => Err(TableError::Config {
            what: format!(
                "unsupported config file extension for {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        }),
    }
}
