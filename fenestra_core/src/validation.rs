//! # Entry Validation
//!
//! Strict checks a form layer can run before submitting. The pipeline never
//! calls these: it stays total and builds whatever it is given.

use crate::errors::{GlazingError, GlazingResult};
use crate::modules::{requirements_for, ModuleId};
use crate::parameters::RawMeasurementEntry;
use crate::units::parse_number;

/// Required fields of `module_id`, as (wire name, raw text) pairs.
fn required_fields(entry: &RawMeasurementEntry, module_id: ModuleId) -> Vec<(&'static str, &str)> {
    let req = requirements_for(module_id);
    let mut fields = Vec::new();
    if req.requires_width {
        fields.push(("width", entry.width.as_str()));
    }
    if req.requires_height {
        fields.push(("height", entry.height.as_str()));
    }
    if req.requires_panel {
        fields.push(("panelCount", entry.panel_count.as_str()));
    }
    if req.requires_vertical_panels {
        fields.push(("verticalPanelCount", entry.vertical_panel_count.as_str()));
    }
    if req.requires_horizontal_panels {
        fields.push(("horizontalPanelCount", entry.horizontal_panel_count.as_str()));
    }
    fields
}

/// Required fields left empty.
///
/// Opening panels are optional even for casements: they default to the panel count.
pub fn missing_fields(entry: &RawMeasurementEntry, module_id: ModuleId) -> Vec<&'static str> {
    required_fields(entry, module_id)
        .into_iter()
        .filter(|(_, text)| text.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

/// Check that every required field holds a positive number.
pub fn validate_entry(entry: &RawMeasurementEntry, module_id: ModuleId) -> GlazingResult<()> {
    for (name, text) in required_fields(entry, module_id) {
        if text.trim().is_empty() {
            return Err(GlazingError::missing_field(name));
        }
        match parse_number(text) {
            Some(v) if v > 0.0 => {}
            Some(_) => return Err(GlazingError::invalid_input(name, text, "Must be greater than zero")),
            None => return Err(GlazingError::invalid_input(name, text, "Not a number")),
        }
    }

    if !entry.opening_panel_count.trim().is_empty() {
        let opening = parse_number(&entry.opening_panel_count);
        let panels = parse_number(&entry.panel_count).unwrap_or(1.0);
        match opening {
            Some(o) if (0.0..=panels).contains(&o) => {}
            _ => {
                return Err(GlazingError::invalid_input(
                    "openingPanelCount",
                    entry.opening_panel_count.as_str(),
                    "Opening panels must be between 0 and the panel count",
                ))
            }
        }
    }
    Ok(())
}
