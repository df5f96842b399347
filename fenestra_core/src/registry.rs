//! # Module Registry
//!
//! Static, read-only table of glazing categories and the types offered under
//! each. It is the single source of truth for whether a category or type is
//! turned on: a type must be looked up here before it is offered to a user or
//! accepted from input.
//!
//! Enabling a module is a deployment decision, so the table is a compile-time
//! constant with no mutation path.
//!
//! ## Usage
//!
//! ```rust
//! use fenestra_core::modules::ModuleId;
//! use fenestra_core::registry::{registry, Category};
//!
//! let reg = registry();
//! assert!(reg.is_category_enabled(Category::Window));
//! assert!(!reg.is_category_enabled(Category::Door));
//! assert_eq!(
//!     reg.module_id_for(Category::Window, "Casement Window (D/Curve)"),
//!     Some(ModuleId::CasementDCurve)
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{GlazingError, GlazingResult};
use crate::modules::ModuleId;

// ============================================================================
// Categories
// ============================================================================

/// Glazing product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Window,
    Door,
    Net,
    Partition,
    CurtainWall,
}

impl Category {
    /// All categories in registry order
    pub const ALL: [Category; 5] = [
        Category::Window,
        Category::Door,
        Category::Net,
        Category::Partition,
        Category::CurtainWall,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Window => "Window",
            Category::Door => "Door",
            Category::Net => "Net",
            Category::Partition => "Partition",
            Category::CurtainWall => "Curtain Wall",
        }
    }

    /// Keyword appended to type labels that don't already mention the category
    pub fn label_suffix(&self) -> &'static str {
        self.display_name()
    }

    /// Module id used for types in this category that have no module of their own
    pub fn placeholder_module(&self) -> ModuleId {
        match self {
            Category::Door => ModuleId::DoorPlaceholder,
            Category::Partition => ModuleId::PartitionPlaceholder,
            Category::Window | Category::Net | Category::CurtainWall => ModuleId::Unresolved,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> GlazingResult<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "window" | "windows" => Ok(Category::Window),
            "door" | "doors" => Ok(Category::Door),
            "net" | "nets" => Ok(Category::Net),
            "partition" | "partitions" => Ok(Category::Partition),
            "curtainwall" | "curtainwalls" => Ok(Category::CurtainWall),
            _ => Err(GlazingError::unknown_category(s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Category {
    type Err = GlazingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_str_flexible(s)
    }
}

// ============================================================================
// Registry Data
// ============================================================================

/// A selectable glazing type within a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeDescriptor {
    /// Stable lookup key, also used as the form option value
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
    /// Backing module; `None` means not implemented yet
    pub module_id: Option<ModuleId>,
    pub enabled: bool,
}

impl TypeDescriptor {
    const fn active(value: &'static str, label: &'static str, module_id: ModuleId) -> Self {
        Self { value, label, module_id: Some(module_id), enabled: true }
    }

    const fn pending(value: &'static str, label: &'static str) -> Self {
        Self { value, label, module_id: None, enabled: false }
    }
}

/// A category row and its ordered types.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryEntry {
    pub category: Category,
    pub name: &'static str,
    pub enabled: bool,
    pub types: &'static [TypeDescriptor],
}

static WINDOW_TYPES: [TypeDescriptor; 6] = [
    TypeDescriptor::active("Casement Window (D/Curve)", "Casement (D/Curve)", ModuleId::CasementDCurve),
    TypeDescriptor::active("Sliding Window (2 Sash)", "Sliding, 2 sash", ModuleId::Sliding2Sash),
    TypeDescriptor::active("Sliding Window (3 Sash)", "Sliding, 3 sash", ModuleId::Sliding3Sash),
    TypeDescriptor::active("Sliding Window with Net (2 Sash)", "Sliding with net, 2 sash", ModuleId::Sliding2SashNet),
    TypeDescriptor::active("Sliding Window with Net (3 Sash)", "Sliding with net, 3 sash", ModuleId::Sliding3SashNet),
    TypeDescriptor::pending("Projected Window", "Projected (top hung)"),
];

static DOOR_TYPES: [TypeDescriptor; 2] = [
    TypeDescriptor::pending("Swing Door", "Swing door"),
    TypeDescriptor::pending("Sliding Door", "Sliding door"),
];

static NET_TYPES: [TypeDescriptor; 3] = [
    TypeDescriptor::active("1125/26 Net (1132-panel)", "1125/26 net, 1132 panel", ModuleId::Net1125Panel1132),
    TypeDescriptor::active("Fixed Net", "Fixed net", ModuleId::NetFixed),
    TypeDescriptor::active("Roller Net", "Roller net", ModuleId::NetRoller),
];

static PARTITION_TYPES: [TypeDescriptor; 1] = [
    TypeDescriptor::pending("Office Partition", "Office partition"),
];

static CURTAIN_WALL_TYPES: [TypeDescriptor; 2] = [
    TypeDescriptor::active("Curtain Wall (Grid)", "Stick grid", ModuleId::CurtainWallGrid),
    TypeDescriptor::pending("Unitized Curtain Wall", "Unitized"),
];

static CATEGORY_ENTRIES: [CategoryEntry; 5] = [
    CategoryEntry { category: Category::Window, name: "Windows", enabled: true, types: &WINDOW_TYPES },
    CategoryEntry { category: Category::Door, name: "Doors", enabled: false, types: &DOOR_TYPES },
    CategoryEntry { category: Category::Net, name: "Nets", enabled: true, types: &NET_TYPES },
    CategoryEntry { category: Category::Partition, name: "Partitions", enabled: false, types: &PARTITION_TYPES },
    CategoryEntry { category: Category::CurtainWall, name: "Curtain Walls", enabled: true, types: &CURTAIN_WALL_TYPES },
];

static REGISTRY: ModuleRegistry = ModuleRegistry {
    entries: &CATEGORY_ENTRIES,
};

/// The process-wide registry.
pub fn registry() -> &'static ModuleRegistry {
    &REGISTRY
}

// ============================================================================
// Queries
// ============================================================================

/// Read-only view over the category/type table.
#[derive(Debug, Serialize)]
pub struct ModuleRegistry {
    entries: &'static [CategoryEntry],
}

impl ModuleRegistry {
    /// All category rows, enabled or not
    pub fn entries(&self) -> &'static [CategoryEntry] {
        self.entries
    }

    fn entry(&self, category: Category) -> Option<&'static CategoryEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    pub fn enabled_categories(&self) -> Vec<Category> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.category)
            .collect()
    }

    /// Enabled types of a category; empty when the category is disabled.
    pub fn enabled_types(&self, category: Category) -> Vec<&'static TypeDescriptor> {
        match self.entry(category) {
            Some(entry) if entry.enabled => entry.types.iter().filter(|t| t.enabled).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_category_enabled(&self, category: Category) -> bool {
        self.entry(category).is_some_and(|e| e.enabled)
    }

    pub fn is_type_enabled(&self, category: Category, type_value: &str) -> bool {
        self.module_id_for(category, type_value).is_some()
    }

    /// Module backing a type, or `None` if the category is disabled, the
    /// type is unknown, or the type is disabled.
    pub fn module_id_for(&self, category: Category, type_value: &str) -> Option<ModuleId> {
        let entry = self.entry(category).filter(|e| e.enabled)?;
        entry
            .types
            .iter()
            .find(|t| t.value == type_value)
            .filter(|t| t.enabled)
            .and_then(|t| t.module_id)
    }

    /// Find a type by exact value across all enabled categories.
    pub fn find_type(&self, type_value: &str) -> Option<(Category, &'static TypeDescriptor)> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .find_map(|e| {
                e.types
                    .iter()
                    .find(|t| t.value == type_value)
                    .map(|t| (e.category, t))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_categories() {
        let cats = registry().enabled_categories();
        assert_eq!(cats, vec![Category::Window, Category::Net, Category::CurtainWall]);
    }

    #[test]
    fn test_disabled_category_exposes_no_types() {
        for entry in registry().entries().iter().filter(|e| !e.enabled) {
            assert!(registry().enabled_types(entry.category).is_empty());
            for t in entry.types {
                assert_eq!(registry().module_id_for(entry.category, t.value), None);
            }
        }
    }

    #[test]
    fn test_enabled_types_have_modules() {
        for entry in registry().entries() {
            for t in entry.types.iter().filter(|t| t.enabled) {
                assert!(t.module_id.is_some(), "{} is enabled without a module", t.value);
            }
        }
    }

    #[test]
    fn test_enabled_types_filters_pending() {
        let windows = registry().enabled_types(Category::Window);
        assert_eq!(windows.len(), 5);
        assert!(windows.iter().all(|t| t.value != "Projected Window"));
    }

    #[test]
    fn test_module_id_for() {
        let reg = registry();
        assert_eq!(
            reg.module_id_for(Category::Net, "1125/26 Net (1132-panel)"),
            Some(ModuleId::Net1125Panel1132)
        );
        assert_eq!(reg.module_id_for(Category::Window, "Projected Window"), None);
        assert_eq!(reg.module_id_for(Category::Window, "Bay Window"), None);
        assert_eq!(reg.module_id_for(Category::Door, "Swing Door"), None);
        // Right value, wrong category
        assert_eq!(reg.module_id_for(Category::Net, "Casement Window (D/Curve)"), None);
    }

    #[test]
    fn test_is_type_enabled() {
        assert!(registry().is_type_enabled(Category::CurtainWall, "Curtain Wall (Grid)"));
        assert!(!registry().is_type_enabled(Category::CurtainWall, "Unitized Curtain Wall"));
    }

    #[test]
    fn test_find_type_skips_disabled_categories() {
        assert!(registry().find_type("Swing Door").is_none());
        let (cat, t) = registry().find_type("Fixed Net").unwrap();
        assert_eq!(cat, Category::Net);
        assert_eq!(t.module_id, Some(ModuleId::NetFixed));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from_str_flexible("curtain wall").unwrap(), Category::CurtainWall);
        assert_eq!(Category::from_str_flexible("Curtain-Walls").unwrap(), Category::CurtainWall);
        assert_eq!(Category::from_str_flexible("NETS").unwrap(), Category::Net);
        assert!(Category::from_str_flexible("roof").is_err());
        assert_eq!("partitions".parse::<Category>().unwrap(), Category::Partition);
        assert_eq!("roof".parse::<Category>().unwrap_err().error_code(), "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_placeholder_modules() {
        assert_eq!(Category::Door.placeholder_module(), ModuleId::DoorPlaceholder);
        assert_eq!(Category::Window.placeholder_module(), ModuleId::Unresolved);
    }
}
