//! # Parameter Building
//!
//! Turns a raw form row into a [`NormalizedSpecification`]: the resolved
//! module, a category-qualified label, and a typed parameter record in
//! millimeters.
//!
//! The parameter shape follows the module's [`ModuleFamily`] from the module
//! table, the same row that supplies its field requirements.
//!
//! ## Example
//!
//! ```rust
//! use fenestra_core::parameters::{build, ModuleParameters, RawMeasurementEntry};
//! use fenestra_core::registry::Category;
//! use fenestra_core::units::LengthUnit;
//!
//! let entry = RawMeasurementEntry {
//!     glazing_type: "1125/26 Net (1132-panel)".to_string(),
//!     width: "90".to_string(),
//!     height: "120".to_string(),
//!     quantity: "1".to_string(),
//!     ..Default::default()
//! };
//! let spec = build(&entry, Category::Net, LengthUnit::Cm);
//! match spec.parameters {
//!     ModuleParameters::Net(p) => assert_eq!(p.in_to_in_width, 900.0),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::modules::{ModuleFamily, ModuleId};
use crate::registry::{registry, Category};
use crate::resolver::normalize_label;
use crate::units::{parse_and_convert, parse_count_or, LengthUnit};

// ============================================================================
// Raw Input
// ============================================================================

/// One measurement row as typed into the form. Every field is raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMeasurementEntry {
    /// Registry type value, or free text
    #[serde(rename = "type")]
    pub glazing_type: String,
    pub width: String,
    pub height: String,
    pub quantity: String,
    pub panel_count: String,
    pub opening_panel_count: String,
    pub vertical_panel_count: String,
    pub horizontal_panel_count: String,
}

// ============================================================================
// Parameter Records
// ============================================================================

/// Anything carrying an order quantity.
pub trait HasQuantity {
    fn qty(&self) -> f64;
}

/// Width/height parameters (sliding and placeholder modules)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameParams {
    pub qty: f64,
    #[serde(rename = "W")]
    pub width: f64,
    #[serde(rename = "H")]
    pub height: f64,
}

/// Casement parameters: frame size, panel count and opening sashes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CasementParams {
    pub qty: f64,
    #[serde(rename = "W")]
    pub width: f64,
    #[serde(rename = "H")]
    pub height: f64,
    #[serde(rename = "N")]
    pub panels: f64,
    #[serde(rename = "O")]
    pub opening_panels: f64,
}

/// Net parameters, measured inside-to-inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetParams {
    pub qty: f64,
    pub in_to_in_width: f64,
    pub in_to_in_height: f64,
}

/// Curtain wall grid parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurtainWallParams {
    pub qty: f64,
    #[serde(rename = "W")]
    pub width: f64,
    #[serde(rename = "H")]
    pub height: f64,
    #[serde(rename = "N_v")]
    pub vertical_panels: f64,
    #[serde(rename = "N_h")]
    pub horizontal_panels: f64,
}

macro_rules! impl_has_quantity {
    ($($type:ty),*) => {
        $(impl HasQuantity for $type {
            fn qty(&self) -> f64 {
                self.qty
            }
        })*
    };
}

impl_has_quantity!(FrameParams, CasementParams, NetParams, CurtainWallParams);

/// Module-specific parameters. Serializes as a flat map of engine keys.
///
/// Deserialization tries the widest shapes first so a casement record is not
/// mistaken for a plain frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleParameters {
    Casement(CasementParams),
    CurtainWall(CurtainWallParams),
    Net(NetParams),
    Frame(FrameParams),
}

impl HasQuantity for ModuleParameters {
    fn qty(&self) -> f64 {
        match self {
            ModuleParameters::Casement(p) => p.qty(),
            ModuleParameters::CurtainWall(p) => p.qty(),
            ModuleParameters::Net(p) => p.qty(),
            ModuleParameters::Frame(p) => p.qty(),
        }
    }
}

impl ModuleParameters {
    /// Open-ended view keyed by engine parameter name
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        let mut map = BTreeMap::new();
        map.insert("qty", self.qty());
        match self {
            ModuleParameters::Casement(p) => {
                map.insert("W", p.width);
                map.insert("H", p.height);
                map.insert("N", p.panels);
                map.insert("O", p.opening_panels);
            }
            ModuleParameters::CurtainWall(p) => {
                map.insert("W", p.width);
                map.insert("H", p.height);
                map.insert("N_v", p.vertical_panels);
                map.insert("N_h", p.horizontal_panels);
            }
            ModuleParameters::Net(p) => {
                map.insert("in_to_in_width", p.in_to_in_width);
                map.insert("in_to_in_height", p.in_to_in_height);
            }
            ModuleParameters::Frame(p) => {
                map.insert("W", p.width);
                map.insert("H", p.height);
            }
        }
        map
    }
}

// ============================================================================
// Normalized Specification
// ============================================================================

/// A fully resolved opening, ready for the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSpecification {
    pub category: Category,
    pub glazing_type_label: String,
    pub module_id: ModuleId,
    pub parameters: ModuleParameters,
}

/// Build the normalized specification for one entry.
///
/// Never fails. Types without an enabled module are tagged with the
/// category's placeholder module and left for the engine to handle.
pub fn build(entry: &RawMeasurementEntry, category: Category, unit: LengthUnit) -> NormalizedSpecification {
    // Same trimmed key the resolver matched on
    let glazing_type = entry.glazing_type.trim();
    let module_id = registry()
        .module_id_for(category, glazing_type)
        .unwrap_or_else(|| {
            let placeholder = category.placeholder_module();
            tracing::debug!(
                glazing_type,
                %category,
                module_id = %placeholder,
                "no enabled module for type, tagging with placeholder"
            );
            placeholder
        });

    NormalizedSpecification {
        category,
        glazing_type_label: normalize_label(glazing_type, category),
        module_id,
        parameters: build_parameters(entry, module_id.family(), unit),
    }
}

/// Build the parameter record for a module family.
pub fn build_parameters(entry: &RawMeasurementEntry, family: ModuleFamily, unit: LengthUnit) -> ModuleParameters {
    let width = parse_and_convert(&entry.width, unit).value();
    let height = parse_and_convert(&entry.height, unit).value();
    let qty = parse_count_or(&entry.quantity, 1.0);

    match family {
        ModuleFamily::Casement => {
            let panels = parse_count_or(&entry.panel_count, 1.0);
            ModuleParameters::Casement(CasementParams {
                qty,
                width,
                height,
                panels,
                opening_panels: parse_count_or(&entry.opening_panel_count, panels),
            })
        }
        ModuleFamily::CurtainWallGrid => ModuleParameters::CurtainWall(CurtainWallParams {
            qty,
            width,
            height,
            vertical_panels: parse_count_or(&entry.vertical_panel_count, 1.0),
            horizontal_panels: parse_count_or(&entry.horizontal_panel_count, 1.0),
        }),
        ModuleFamily::Net => ModuleParameters::Net(NetParams {
            qty,
            in_to_in_width: width,
            in_to_in_height: height,
        }),
        ModuleFamily::Sliding | ModuleFamily::Placeholder => {
            ModuleParameters::Frame(FrameParams { qty, width, height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::requirements_for;

    fn entry(glazing_type: &str, width: &str, height: &str, quantity: &str) -> RawMeasurementEntry {
        RawMeasurementEntry {
            glazing_type: glazing_type.to_string(),
            width: width.to_string(),
            height: height.to_string(),
            quantity: quantity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_casement_scenario() {
        let mut e = entry("Casement Window (D/Curve)", "1200", "1500", "2");
        e.panel_count = "2".to_string();
        let spec = build(&e, Category::Window, LengthUnit::Mm);

        assert_eq!(spec.module_id, ModuleId::CasementDCurve);
        assert_eq!(
            spec.parameters,
            ModuleParameters::Casement(CasementParams {
                qty: 2.0,
                width: 1200.0,
                height: 1500.0,
                panels: 2.0,
                opening_panels: 2.0,
            })
        );
    }

    #[test]
    fn test_casement_explicit_opening_panels() {
        let mut e = entry("Casement Window (D/Curve)", "1200", "1500", "1");
        e.panel_count = "3".to_string();
        e.opening_panel_count = "1".to_string();
        let map = build(&e, Category::Window, LengthUnit::Mm).parameters.to_map();
        assert_eq!(map["N"], 3.0);
        assert_eq!(map["O"], 1.0);
    }

    #[test]
    fn test_net_scenario() {
        let e = entry("1125/26 Net (1132-panel)", "90", "120", "1");
        let spec = build(&e, Category::Net, LengthUnit::Cm);

        assert_eq!(spec.module_id, ModuleId::Net1125Panel1132);
        assert_eq!(
            spec.parameters,
            ModuleParameters::Net(NetParams {
                qty: 1.0,
                in_to_in_width: 900.0,
                in_to_in_height: 1200.0,
            })
        );
    }

    #[test]
    fn test_curtain_wall_defaults() {
        let e = entry("Curtain Wall (Grid)", "3", "2.5", "");
        let spec = build(&e, Category::CurtainWall, LengthUnit::M);
        assert_eq!(
            spec.parameters,
            ModuleParameters::CurtainWall(CurtainWallParams {
                qty: 1.0,
                width: 3000.0,
                height: 2500.0,
                vertical_panels: 1.0,
                horizontal_panels: 1.0,
            })
        );
    }

    #[test]
    fn test_sliding_ignores_panel_input() {
        let mut e = entry("Sliding Window (3 Sash)", "10", "5", "4");
        e.panel_count = "7".to_string();
        let spec = build(&e, Category::Window, LengthUnit::Ft);
        assert_eq!(
            spec.parameters,
            ModuleParameters::Frame(FrameParams { qty: 4.0, width: 3048.0, height: 1524.0 })
        );
    }

    #[test]
    fn test_unparseable_fields_fall_back() {
        let e = entry("Fixed Net", "wide", "", "lots");
        let spec = build(&e, Category::Net, LengthUnit::Mm);
        assert_eq!(
            spec.parameters,
            ModuleParameters::Net(NetParams { qty: 1.0, in_to_in_width: 0.0, in_to_in_height: 0.0 })
        );
    }

    #[test]
    fn test_unresolved_type_gets_placeholder() {
        let e = entry("Bay", "1000", "1000", "1");
        let spec = build(&e, Category::Window, LengthUnit::Mm);
        assert_eq!(spec.module_id, ModuleId::Unresolved);
        assert_eq!(spec.glazing_type_label, "Bay Window");
        assert!(matches!(spec.parameters, ModuleParameters::Frame(_)));

        let door = build(&entry("Swing Door", "900", "2100", "1"), Category::Door, LengthUnit::Mm);
        assert_eq!(door.module_id, ModuleId::DoorPlaceholder);
    }

    #[test]
    fn test_padded_type_value_resolves_module() {
        let spec = build(&entry("  Fixed Net ", "900", "1200", "1"), Category::Net, LengthUnit::Mm);
        assert_eq!(spec.module_id, ModuleId::NetFixed);
        assert_eq!(spec.glazing_type_label, "Fixed Net");
        assert_eq!(
            spec.parameters,
            ModuleParameters::Net(NetParams { qty: 1.0, in_to_in_width: 900.0, in_to_in_height: 1200.0 })
        );

        let spec = build(&entry("Curtain Wall (Grid)\t", "3000", "2500", "1"), Category::CurtainWall, LengthUnit::Mm);
        assert_eq!(spec.module_id, ModuleId::CurtainWallGrid);
    }

    #[test]
    fn test_every_registry_module_has_requirements_and_builder() {
        let full = RawMeasurementEntry {
            glazing_type: String::new(),
            width: "100".to_string(),
            height: "200".to_string(),
            quantity: "1".to_string(),
            panel_count: "2".to_string(),
            opening_panel_count: "1".to_string(),
            vertical_panel_count: "3".to_string(),
            horizontal_panel_count: "4".to_string(),
        };

        for cat_entry in registry().entries() {
            for t in cat_entry.types.iter() {
                let module_id = t.module_id.unwrap_or(cat_entry.category.placeholder_module());
                let def = module_id.definition();
                if t.enabled {
                    let def = def.unwrap_or_else(|| panic!("{} has no table row", module_id));
                    assert_eq!(def.category, cat_entry.category);
                }

                let req = requirements_for(module_id);
                let params = build_parameters(&full, module_id.family(), LengthUnit::Mm).to_map();
                assert_eq!(params.contains_key("N"), req.requires_panel, "{}", module_id);
                assert_eq!(params.contains_key("O"), req.requires_opening_panels, "{}", module_id);
                assert_eq!(params.contains_key("N_v"), req.requires_vertical_panels, "{}", module_id);
                assert_eq!(params.contains_key("N_h"), req.requires_horizontal_panels, "{}", module_id);
                assert_eq!(
                    params.contains_key("in_to_in_width"),
                    req.requires_inside_to_inside,
                    "{}",
                    module_id
                );
                assert_eq!(params.contains_key("W"), !req.requires_inside_to_inside, "{}", module_id);
            }
        }
    }

    #[test]
    fn test_parameters_serialize_flat() {
        let params = ModuleParameters::CurtainWall(CurtainWallParams {
            qty: 1.0,
            width: 3000.0,
            height: 2500.0,
            vertical_panels: 2.0,
            horizontal_panels: 3.0,
        });
        let json = serde_json::to_value(params).unwrap();
        assert_eq!(json["N_v"], 2.0);
        assert_eq!(json["W"], 3000.0);
        assert!(json.get("CurtainWall").is_none());
    }

    #[test]
    fn test_entry_deserializes_with_missing_fields() {
        let json = r#"{"type":"1125/26 Net (1132-panel)","width":"90","height":"120","quantity":"1"}"#;
        let e: RawMeasurementEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.glazing_type, "1125/26 Net (1132-panel)");
        assert!(e.panel_count.is_empty());
    }
}
