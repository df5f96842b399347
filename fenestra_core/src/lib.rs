//! # fenestra_core - Glazing Measurement Pipeline
//!
//! `fenestra_core` turns free-form glazing measurements (windows, nets,
//! curtain walls) into the typed request payload of an external calculation
//! engine, and transcodes quote payloads between the UI and the quote service.
//!
//! ## Design Philosophy
//!
//! - **Total**: The pipeline never fails. Unparseable numbers become `0` (or
//!   `1` for counts), unknown types resolve to `Window`, unimplemented modules
//!   travel with a placeholder id
//! - **Stateless**: Pure functions, no I/O, no shared mutable state
//! - **JSON-First**: All payload types implement Serialize/Deserialize
//! - **Table-Driven**: Field requirements and parameter building read the same
//!   module table row
//!
//! ## Quick Start
//!
//! ```rust
//! use fenestra_core::parameters::RawMeasurementEntry;
//! use fenestra_core::pipeline::normalize_entries;
//! use fenestra_core::resolver::CategorySelections;
//! use fenestra_core::units::LengthUnit;
//! use fenestra_core::cart::{CalculationRequest, CalculationSettings};
//!
//! let entry = RawMeasurementEntry {
//!     glazing_type: "Casement Window (D/Curve)".to_string(),
//!     width: "1200".to_string(),
//!     height: "1500".to_string(),
//!     quantity: "2".to_string(),
//!     panel_count: "2".to_string(),
//!     ..Default::default()
//! };
//!
//! let specs = normalize_entries(&[entry], &CategorySelections::new(), LengthUnit::Mm);
//! let request = CalculationRequest::new(&specs, CalculationSettings::default());
//! let json = serde_json::to_string_pretty(&request).unwrap();
//! assert!(json.contains("casement_d_curve"));
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Length units and fail-to-zero parsing
//! - [`registry`] - Categories, types and their modules
//! - [`modules`] - Module table: field requirements and parameter families
//! - [`resolver`] - Free-text type to category resolution, label normalization
//! - [`parameters`] - Raw entry to normalized specification
//! - [`cart`] - Project cart and calculation request
//! - [`quote`] - Quote request/preview transcoding
//! - [`pipeline`] - Batch entry point
//! - [`validation`] - Strict checks for form layers
//! - [`config`] - TOML configuration
//! - [`errors`] - Structured error types

pub mod cart;
pub mod config;
pub mod errors;
pub mod modules;
pub mod parameters;
pub mod pipeline;
pub mod quote;
pub mod registry;
pub mod resolver;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use cart::{to_cart, CalculationRequest, CalculationSettings, ProjectCartItem};
pub use config::PipelineConfig;
pub use errors::{GlazingError, GlazingResult};
pub use modules::{requirements_for, FieldRequirements, ModuleId};
pub use parameters::{build, ModuleParameters, NormalizedSpecification, RawMeasurementEntry};
pub use pipeline::{assemble_request, normalize_batch, prepare_calculation, MeasurementBatch};
pub use registry::{registry, Category};
pub use resolver::{normalize_label, resolve_category, CategorySelections};
pub use units::LengthUnit;
