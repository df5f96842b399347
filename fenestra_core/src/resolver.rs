//! # Category Resolution
//!
//! Maps a measurement entry's free-text type to a [`Category`].
//!
//! 1. Exact match against registry type values in enabled categories.
//! 2. Case-insensitive containment against the labels the user picked in the
//!    project selection step, category by category in selection order.
//! 3. [`Category::Window`].
//!
//! Step 2 exists because the selection step and the registry use independent
//! vocabularies. It can match ambiguously; the first hinted category wins.

use serde::{Deserialize, Serialize};

use crate::registry::{registry, Category};

/// Labels selected for one category during project selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySelection {
    pub category: Category,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Ordered category hints from the project selection step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySelections(pub Vec<CategorySelection>);

impl CategorySelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper appending a category and its labels
    pub fn with(mut self, category: Category, labels: &[&str]) -> Self {
        self.0.push(CategorySelection {
            category,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        });
        self
    }

    fn hinted_category(&self, raw_type: &str) -> Option<Category> {
        let needle = raw_type.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.0.iter().find_map(|sel| {
            sel.labels
                .iter()
                .map(|l| l.trim().to_lowercase())
                .filter(|l| !l.is_empty())
                .any(|l| needle.contains(&l) || l.contains(&needle))
                .then_some(sel.category)
        })
    }
}

/// Resolve the category of a raw type string.
pub fn resolve_category(raw_type: &str, hints: &CategorySelections) -> Category {
    if let Some((category, _)) = registry().find_type(raw_type.trim()) {
        return category;
    }
    if let Some(category) = hints.hinted_category(raw_type) {
        tracing::debug!(raw_type, %category, "category resolved from selection hints");
        return category;
    }
    tracing::debug!(raw_type, "no registry or hint match, defaulting to Window");
    Category::Window
}

/// Append the category keyword to a type label unless it already mentions it.
pub fn normalize_label(raw_type: &str, category: Category) -> String {
    let raw = raw_type.trim();
    let suffix = category.label_suffix();
    if raw.is_empty() {
        return suffix.to_string();
    }
    if raw.to_lowercase().contains(&suffix.to_lowercase()) {
        raw.to_string()
    } else {
        format!("{} {}", raw, suffix)
    }
}
