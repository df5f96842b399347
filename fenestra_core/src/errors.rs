//! # Error Types
//!
//! Structured error types for fenestra_core. The normalization pipeline itself
//! is total and never fails; these errors belong to its edges: configuration
//! loading, decoding input documents, flexible enum parsing, and the strict
//! entry validator offered to form layers.
//!
//! ## Example
//!
//! ```rust
//! use fenestra_core::errors::{GlazingError, GlazingResult};
//!
//! fn validate_width(width_mm: f64) -> GlazingResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(GlazingError::InvalidInput {
//!             field: "width".to_string(),
//!             value: width_mm.to_string(),
//!             reason: "Width must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fenestra_core operations
pub type GlazingResult<T> = Result<T, GlazingError>;

/// Structured error type for the fallible edges of the pipeline.
///
/// Each variant carries enough context for a form layer (or an LLM driving
/// the CLI) to point at the offending value.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum GlazingError {
    /// An input value is invalid (unparseable, out of range, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field the selected module requires was left empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A module identifier that is not in the module table
    #[error("Unknown module: {module_id}")]
    UnknownModule { module_id: String },

    /// A category name that is not one of the fixed categories
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// A length unit that is not supported
    #[error("Unknown unit: {unit}")]
    UnknownUnit { unit: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Configuration file could not be parsed
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl GlazingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        GlazingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        GlazingError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownModule error
    pub fn unknown_module(module_id: impl Into<String>) -> Self {
        GlazingError::UnknownModule {
            module_id: module_id.into(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(name: impl Into<String>) -> Self {
        GlazingError::UnknownCategory { name: name.into() }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        GlazingError::UnknownUnit { unit: unit.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        GlazingError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(reason: impl Into<String>) -> Self {
        GlazingError::ConfigError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            GlazingError::InvalidInput { .. } => "INVALID_INPUT",
            GlazingError::MissingField { .. } => "MISSING_FIELD",
            GlazingError::UnknownModule { .. } => "UNKNOWN_MODULE",
            GlazingError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            GlazingError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            GlazingError::FileError { .. } => "FILE_ERROR",
            GlazingError::ConfigError { .. } => "CONFIG_ERROR",
            GlazingError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for GlazingError {
    fn from(err: serde_json::Error) -> Self {
        GlazingError::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GlazingError {
    fn from(err: toml::de::Error) -> Self {
        GlazingError::config_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = GlazingError::invalid_input("width", "-5", "Width must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: GlazingError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(GlazingError::missing_field("width").error_code(), "MISSING_FIELD");
        assert_eq!(GlazingError::unknown_module("x").error_code(), "UNKNOWN_MODULE");
        assert_eq!(GlazingError::unknown_unit("yd").error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_from_json_error() {
        let err: GlazingError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
