//! # Module Table
//!
//! One row per calculation module. Each row ties a [`ModuleId`] to its
//! category, its parameter family, and the form fields it requires, so field
//! requirements and parameter building are both driven from the same entry.
//!
//! ## Usage
//!
//! ```rust
//! use fenestra_core::modules::{requirements_for, ModuleFamily, ModuleId};
//!
//! let req = requirements_for(ModuleId::CasementDCurve);
//! assert!(req.requires_opening_panels);
//! assert_eq!(ModuleId::Net1125Panel1132.family(), ModuleFamily::Net);
//! ```
//!
//! Adding a module means adding one [`ModuleId`] variant and one row in
//! [`MODULE_TABLE`].

use serde::{Deserialize, Serialize};

use crate::errors::GlazingError;
use crate::registry::Category;

// ============================================================================
// Module Identifiers
// ============================================================================

/// Identifier of a calculation module in the external engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleId {
    #[serde(rename = "casement_d_curve")]
    CasementDCurve,
    #[serde(rename = "sliding_2_sash")]
    Sliding2Sash,
    #[serde(rename = "sliding_3_sash")]
    Sliding3Sash,
    #[serde(rename = "sliding_2_sash_net")]
    Sliding2SashNet,
    #[serde(rename = "sliding_3_sash_net")]
    Sliding3SashNet,
    #[serde(rename = "net_1125_26_1132")]
    Net1125Panel1132,
    #[serde(rename = "net_fixed")]
    NetFixed,
    #[serde(rename = "net_roller")]
    NetRoller,
    #[serde(rename = "curtain_wall_grid")]
    CurtainWallGrid,
    /// Doors are configured but not yet backed by a module
    #[serde(rename = "door_placeholder")]
    DoorPlaceholder,
    /// Partitions are configured but not yet backed by a module
    #[serde(rename = "partition_placeholder")]
    PartitionPlaceholder,
    /// A type in an implemented category that has no module
    #[serde(rename = "unresolved")]
    Unresolved,
}

impl ModuleId {
    pub const ALL: [ModuleId; 12] = [
        ModuleId::CasementDCurve,
        ModuleId::Sliding2Sash,
        ModuleId::Sliding3Sash,
        ModuleId::Sliding2SashNet,
        ModuleId::Sliding3SashNet,
        ModuleId::Net1125Panel1132,
        ModuleId::NetFixed,
        ModuleId::NetRoller,
        ModuleId::CurtainWallGrid,
        ModuleId::DoorPlaceholder,
        ModuleId::PartitionPlaceholder,
        ModuleId::Unresolved,
    ];

    /// Wire identifier sent to the engine
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleId::CasementDCurve => "casement_d_curve",
            ModuleId::Sliding2Sash => "sliding_2_sash",
            ModuleId::Sliding3Sash => "sliding_3_sash",
            ModuleId::Sliding2SashNet => "sliding_2_sash_net",
            ModuleId::Sliding3SashNet => "sliding_3_sash_net",
            ModuleId::Net1125Panel1132 => "net_1125_26_1132",
            ModuleId::NetFixed => "net_fixed",
            ModuleId::NetRoller => "net_roller",
            ModuleId::CurtainWallGrid => "curtain_wall_grid",
            ModuleId::DoorPlaceholder => "door_placeholder",
            ModuleId::PartitionPlaceholder => "partition_placeholder",
            ModuleId::Unresolved => "unresolved",
        }
    }

    /// Whether this id stands in for a module that does not exist yet
    pub fn is_placeholder(self) -> bool {
        matches!(
            self,
            ModuleId::DoorPlaceholder | ModuleId::PartitionPlaceholder | ModuleId::Unresolved
        )
    }

    /// Table row for this module, if it has one
    pub fn definition(self) -> Option<&'static ModuleDefinition> {
        MODULE_TABLE.iter().find(|d| d.id == self)
    }

    /// Parameter family; modules without a row build like placeholders
    pub fn family(self) -> ModuleFamily {
        self.definition()
            .map(|d| d.family)
            .unwrap_or(ModuleFamily::Placeholder)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModuleId {
    type Err = GlazingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| GlazingError::unknown_module(s))
    }
}

// ============================================================================
// Families and Requirements
// ============================================================================

/// Shape of the parameter record a module consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleFamily {
    /// W, H, N (panels) and O (opening sashes)
    Casement,
    /// W, H; panel count is fixed by the module itself
    Sliding,
    /// Inside-to-inside width and height
    Net,
    /// W, H, vertical and horizontal panel counts
    CurtainWallGrid,
    /// W, H only
    Placeholder,
}

/// Which measurement fields a module needs, and how the form should label them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldRequirements {
    pub requires_width: bool,
    pub requires_height: bool,
    pub requires_panel: bool,
    pub requires_opening_panels: bool,
    pub requires_vertical_panels: bool,
    pub requires_horizontal_panels: bool,
    pub requires_inside_to_inside: bool,
    pub width_label: &'static str,
    pub height_label: &'static str,
    pub panel_label: &'static str,
}

impl FieldRequirements {
    /// Requirements for unknown and unlisted module ids: width and height only
    pub const DEFAULT: FieldRequirements = FieldRequirements {
        requires_width: true,
        requires_height: true,
        requires_panel: false,
        requires_opening_panels: false,
        requires_vertical_panels: false,
        requires_horizontal_panels: false,
        requires_inside_to_inside: false,
        width_label: "Width",
        height_label: "Height",
        panel_label: "Panels",
    };

    const CASEMENT: FieldRequirements = FieldRequirements {
        requires_panel: true,
        requires_opening_panels: true,
        panel_label: "Number of Panels",
        ..FieldRequirements::DEFAULT
    };

    const SLIDING: FieldRequirements = FieldRequirements::DEFAULT;

    const NET: FieldRequirements = FieldRequirements {
        requires_inside_to_inside: true,
        width_label: "Inside-to-Inside Width",
        height_label: "Inside-to-Inside Height",
        ..FieldRequirements::DEFAULT
    };

    const CURTAIN_WALL_GRID: FieldRequirements = FieldRequirements {
        requires_vertical_panels: true,
        requires_horizontal_panels: true,
        width_label: "Overall Width",
        height_label: "Overall Height",
        panel_label: "Grid Panels",
        ..FieldRequirements::DEFAULT
    };
}

impl Default for FieldRequirements {
    fn default() -> Self {
        FieldRequirements::DEFAULT
    }
}

// ============================================================================
// Module Table
// ============================================================================

/// One row of the module table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModuleDefinition {
    pub id: ModuleId,
    pub category: Category,
    pub family: ModuleFamily,
    pub requirements: FieldRequirements,
}

impl ModuleDefinition {
    const fn new(id: ModuleId, category: Category, family: ModuleFamily, requirements: FieldRequirements) -> Self {
        Self { id, category, family, requirements }
    }
}

/// Every module the engine knows about, plus the two category placeholders.
pub static MODULE_TABLE: [ModuleDefinition; 11] = [
    ModuleDefinition::new(ModuleId::CasementDCurve, Category::Window, ModuleFamily::Casement, FieldRequirements::CASEMENT),
    ModuleDefinition::new(ModuleId::Sliding2Sash, Category::Window, ModuleFamily::Sliding, FieldRequirements::SLIDING),
    ModuleDefinition::new(ModuleId::Sliding3Sash, Category::Window, ModuleFamily::Sliding, FieldRequirements::SLIDING),
    ModuleDefinition::new(ModuleId::Sliding2SashNet, Category::Window, ModuleFamily::Sliding, FieldRequirements::SLIDING),
    ModuleDefinition::new(ModuleId::Sliding3SashNet, Category::Window, ModuleFamily::Sliding, FieldRequirements::SLIDING),
    ModuleDefinition::new(ModuleId::Net1125Panel1132, Category::Net, ModuleFamily::Net, FieldRequirements::NET),
    ModuleDefinition::new(ModuleId::NetFixed, Category::Net, ModuleFamily::Net, FieldRequirements::NET),
    ModuleDefinition::new(ModuleId::NetRoller, Category::Net, ModuleFamily::Net, FieldRequirements::NET),
    ModuleDefinition::new(ModuleId::CurtainWallGrid, Category::CurtainWall, ModuleFamily::CurtainWallGrid, FieldRequirements::CURTAIN_WALL_GRID),
    ModuleDefinition::new(ModuleId::DoorPlaceholder, Category::Door, ModuleFamily::Placeholder, FieldRequirements::DEFAULT),
    ModuleDefinition::new(ModuleId::PartitionPlaceholder, Category::Partition, ModuleFamily::Placeholder, FieldRequirements::DEFAULT),
];

/// Field requirements for a module id.
pub fn requirements_for(module_id: ModuleId) -> FieldRequirements {
    module_id
        .definition()
        .map(|d| d.requirements)
        .unwrap_or(FieldRequirements::DEFAULT)
}

/// Field requirements for a raw wire id; unknown ids get the default.
pub fn requirements_for_str(module_id: &str) -> FieldRequirements {
    module_id
        .parse::<ModuleId>()
        .map(requirements_for)
        .unwrap_or(FieldRequirements::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_one_row_per_module() {
        for def in MODULE_TABLE.iter() {
            let rows = MODULE_TABLE.iter().filter(|d| d.id == def.id).count();
            assert_eq!(rows, 1, "{} appears {} times", def.id, rows);
        }
    }

    #[test]
    fn test_family_counts() {
        let count = |f: ModuleFamily| MODULE_TABLE.iter().filter(|d| d.family == f).count();
        assert_eq!(count(ModuleFamily::Casement), 1);
        assert_eq!(count(ModuleFamily::Sliding), 4);
        assert_eq!(count(ModuleFamily::Net), 3);
        assert_eq!(count(ModuleFamily::CurtainWallGrid), 1);
        assert_eq!(count(ModuleFamily::Placeholder), 2);
    }

    #[test]
    fn test_unknown_ids_get_default() {
        assert_eq!(requirements_for(ModuleId::Unresolved), FieldRequirements::DEFAULT);
        assert_eq!(requirements_for_str("bay_window_v9"), FieldRequirements::DEFAULT);
        let req = requirements_for_str("bay_window_v9");
        assert!(req.requires_width && req.requires_height);
        assert!(!req.requires_panel && !req.requires_inside_to_inside);
    }

    #[test]
    fn test_net_requirements() {
        let req = requirements_for_str("net_fixed");
        assert!(req.requires_inside_to_inside);
        assert_eq!(req.width_label, "Inside-to-Inside Width");
    }

    #[test]
    fn test_wire_ids_roundtrip() {
        for id in ModuleId::ALL {
            assert_eq!(id.as_str().parse::<ModuleId>().unwrap(), id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
        assert!("nope".parse::<ModuleId>().is_err());
    }

    #[test]
    fn test_placeholders() {
        assert!(ModuleId::DoorPlaceholder.is_placeholder());
        assert!(ModuleId::Unresolved.is_placeholder());
        assert!(!ModuleId::CasementDCurve.is_placeholder());
        assert_eq!(ModuleId::Unresolved.family(), ModuleFamily::Placeholder);
    }
}
