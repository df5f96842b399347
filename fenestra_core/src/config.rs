//! # Pipeline Configuration
//!
//! Deployment defaults for the pipeline, read from a TOML file. Every field is
//! optional; a missing file section falls back to [`PipelineConfig::default`].
//!
//! ```toml
//! default_unit = "cm"
//!
//! [settings]
//! stock_length = 5800.0
//! blade_kerf = 3.5
//! waste_threshold = 150.0
//! ```
//!
//! The module registry is deliberately absent here: which modules are enabled
//! is fixed at compile time.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cart::CalculationSettings;
use crate::errors::{GlazingError, GlazingResult};
use crate::units::LengthUnit;

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "FENESTRA_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Unit assumed for batches that don't name one
    pub default_unit: LengthUnit,
    /// Cutting settings sent with every calculation request
    pub settings: CalculationSettings,
}

impl PipelineConfig {
    pub fn from_toml_str(source: &str) -> GlazingResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> GlazingResult<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| GlazingError::file_error("read", path.display().to_string(), e.to_string()))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), unit = %config.default_unit, "loaded pipeline config");
        Ok(config)
    }
}
