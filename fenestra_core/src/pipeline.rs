//! # Measurement Pipeline
//!
//! Runs a whole batch through resolve → build → cart. A batch is everything
//! the measurement step hands over in one submission: the rows, the unit they
//! were taken in, and the category hints from project selection.
//!
//! ## Example
//!
//! ```rust
//! use fenestra_core::config::PipelineConfig;
//! use fenestra_core::pipeline::{prepare_calculation, MeasurementBatch};
//!
//! let batch: MeasurementBatch = serde_json::from_str(r#"{
//!     "unit": "mm",
//!     "entries": [
//!         {"type": "Casement Window (D/Curve)", "width": "1200", "height": "1500",
//!          "quantity": "2", "panelCount": "2"}
//!     ]
//! }"#).unwrap();
//!
//! let request = prepare_calculation(&batch, &PipelineConfig::default());
//! assert_eq!(request.project_cart.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::cart::{CalculationRequest, CalculationSettings};
use crate::config::PipelineConfig;
use crate::parameters::{build, NormalizedSpecification, RawMeasurementEntry};
use crate::resolver::{resolve_category, CategorySelections};
use crate::units::LengthUnit;

/// One submission from the measurement step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeasurementBatch {
    /// Unit for every row; the configured default when absent
    pub unit: Option<LengthUnit>,
    pub selections: CategorySelections,
    pub entries: Vec<RawMeasurementEntry>,
    /// Overrides the configured cutting settings
    pub settings: Option<CalculationSettings>,
}

impl MeasurementBatch {
    /// Batch unit, else the configured default
    pub fn unit_or(&self, config: &PipelineConfig) -> LengthUnit {
        self.unit.unwrap_or(config.default_unit)
    }

    /// Batch settings, else the configured ones
    pub fn settings_or(&self, config: &PipelineConfig) -> CalculationSettings {
        self.settings.unwrap_or(config.settings)
    }
}

/// Resolve and build every entry, in order.
pub fn normalize_entries(
    entries: &[RawMeasurementEntry],
    selections: &CategorySelections,
    unit: LengthUnit,
) -> Vec<NormalizedSpecification> {
    entries
        .iter()
        .map(|entry| {
            let category = resolve_category(&entry.glazing_type, selections);
            build(entry, category, unit)
        })
        .collect()
}

/// Normalize a batch's entries with its effective unit.
///
/// The result lines up with `batch.entries` index for index, so callers can
/// check each raw entry against the module it was built for.
pub fn normalize_batch(batch: &MeasurementBatch, config: &PipelineConfig) -> Vec<NormalizedSpecification> {
    normalize_entries(&batch.entries, &batch.selections, batch.unit_or(config))
}

/// Wrap already-normalized entries into the engine request for a batch.
pub fn assemble_request(
    batch: &MeasurementBatch,
    config: &PipelineConfig,
    specs: &[NormalizedSpecification],
) -> CalculationRequest {
    let placeholders = specs.iter().filter(|s| s.module_id.is_placeholder()).count();
    tracing::info!(
        entries = specs.len(),
        placeholders,
        unit = %batch.unit_or(config),
        "calculation request assembled"
    );

    CalculationRequest::new(specs, batch.settings_or(config))
}

/// Produce the calculation engine request for a batch.
pub fn prepare_calculation(batch: &MeasurementBatch, config: &PipelineConfig) -> CalculationRequest {
    assemble_request(batch, config, &normalize_batch(batch, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ModuleId;
    use crate::registry::Category;

    fn batch() -> MeasurementBatch {
        let json = r#"{
            "unit": "cm",
            "selections": [{"category": "CurtainWall", "labels": ["facade"]}],
            "entries": [
                {"type": "1125/26 Net (1132-panel)", "width": "90", "height": "120", "quantity": "1"},
                {"type": "Shopfront facade", "width": "400", "height": "300",
                 "verticalPanelCount": "4", "horizontalPanelCount": "2"},
                {"type": "Mystery", "width": "", "height": "abc"}
            ]
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_normalize_entries() {
        let b = batch();
        let specs = normalize_entries(&b.entries, &b.selections, LengthUnit::Cm);
        assert_eq!(specs.len(), 3);

        assert_eq!(specs[0].category, Category::Net);
        assert_eq!(specs[0].module_id, ModuleId::Net1125Panel1132);

        // Resolved through the hint, but the free text has no module
        assert_eq!(specs[1].category, Category::CurtainWall);
        assert_eq!(specs[1].module_id, ModuleId::Unresolved);
        assert_eq!(specs[1].glazing_type_label, "Shopfront facade Curtain Wall");

        assert_eq!(specs[2].category, Category::Window);
        assert_eq!(specs[2].glazing_type_label, "Mystery Window");
    }

    #[test]
    fn test_prepare_uses_batch_unit_and_config_settings() {
        let config = PipelineConfig {
            default_unit: LengthUnit::Mm,
            settings: CalculationSettings {
                stock_length: 5800.0,
                ..Default::default()
            },
        };
        let request = prepare_calculation(&batch(), &config);
        assert_eq!(request.project_cart.len(), 3);
        assert_eq!(request.settings.stock_length, 5800.0);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["projectCart"][0]["in_to_in_width"], 900.0);
        assert_eq!(json["projectCart"][2]["W"], 0.0);
    }

    #[test]
    fn test_prepare_falls_back_to_config_unit() {
        let mut b = batch();
        b.unit = None;
        b.settings = Some(CalculationSettings {
            blade_kerf: 2.0,
            ..Default::default()
        });
        let config = PipelineConfig {
            default_unit: LengthUnit::M,
            ..Default::default()
        };
        let request = prepare_calculation(&b, &config);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["projectCart"][0]["in_to_in_width"], 90_000.0);
        assert_eq!(request.settings.blade_kerf, 2.0);
    }

    #[test]
    fn test_padded_type_values_build_their_module() {
        let json = r#"{
            "unit": "mm",
            "entries": [
                {"type": " Fixed Net ", "width": "900", "height": "1200"},
                {"type": "Sliding Window (2 Sash)  ", "width": "1500", "height": "1200"}
            ]
        }"#;
        let b: MeasurementBatch = serde_json::from_str(json).unwrap();
        let specs = normalize_batch(&b, &PipelineConfig::default());
        assert_eq!(specs[0].category, Category::Net);
        assert_eq!(specs[0].module_id, ModuleId::NetFixed);
        assert_eq!(specs[1].module_id, ModuleId::Sliding2Sash);

        let json = serde_json::to_value(prepare_calculation(&b, &PipelineConfig::default())).unwrap();
        assert_eq!(json["projectCart"][0]["module_id"], "net_fixed");
        assert_eq!(json["projectCart"][0]["in_to_in_width"], 900.0);
    }

    #[test]
    fn test_empty_batch() {
        let request = prepare_calculation(&MeasurementBatch::default(), &PipelineConfig::default());
        assert!(request.project_cart.is_empty());
        assert_eq!(request.settings, CalculationSettings::default());
    }
}
