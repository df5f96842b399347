//! # Project Cart
//!
//! Flattens normalized specifications into the calculation engine's request
//! shape. One specification yields exactly one cart item, in order.
//!
//! ## JSON Shape
//!
//! ```json
//! {
//!   "projectCart": [
//!     { "module_id": "casement_d_curve", "qty": 2.0, "W": 1200.0, "H": 1500.0, "N": 2.0, "O": 2.0 },
//!     { "module_id": "net_1125_26_1132", "qty": 1.0, "in_to_in_width": 900.0, "in_to_in_height": 1200.0 }
//!   ],
//!   "settings": { "stockLength": 6000.0, "bladeKerf": 4.0, "wasteThreshold": 200.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::modules::ModuleId;
use crate::parameters::{ModuleParameters, NormalizedSpecification};

/// One line of the project cart: module id plus its parameters at top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCartItem {
    pub module_id: ModuleId,
    #[serde(flatten)]
    pub parameters: ModuleParameters,
}

impl From<&NormalizedSpecification> for ProjectCartItem {
    fn from(spec: &NormalizedSpecification) -> Self {
        ProjectCartItem {
            module_id: spec.module_id,
            parameters: spec.parameters,
        }
    }
}

/// Cutting settings, passed to the engine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationSettings {
    /// Length of one stock bar (mm)
    #[serde(alias = "stock_length")]
    pub stock_length: f64,
    /// Saw blade kerf (mm)
    #[serde(alias = "blade_kerf")]
    pub blade_kerf: f64,
    /// Offcuts shorter than this are scrap (mm)
    #[serde(alias = "waste_threshold")]
    pub waste_threshold: f64,
}

impl Default for CalculationSettings {
    fn default() -> Self {
        CalculationSettings {
            stock_length: 6000.0,
            blade_kerf: 4.0,
            waste_threshold: 200.0,
        }
    }
}

/// Request body for the external calculation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub project_cart: Vec<ProjectCartItem>,
    pub settings: CalculationSettings,
}

impl CalculationRequest {
    pub fn new(specs: &[NormalizedSpecification], settings: CalculationSettings) -> Self {
        CalculationRequest {
            project_cart: to_cart(specs),
            settings,
        }
    }
}

/// Flatten specifications into cart items, preserving order.
pub fn to_cart(specs: &[NormalizedSpecification]) -> Vec<ProjectCartItem> {
    specs.iter().map(ProjectCartItem::from).collect()
}
