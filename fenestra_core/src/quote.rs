//! # Quote Transcoding
//!
//! Two independent directions between the UI's quote shapes and the external
//! quote service:
//!
//! - **Outbound**: [`to_quote_request`] turns the quote configuration form into
//!   a creation request with one line per nonzero cost component.
//! - **Inbound**: [`to_quote_preview`] turns a stored quote into the display
//!   view model.
//!
//! Tax is inferred from the form's grand total rather than computed forward:
//! the total the user saw is authoritative.
//!
//! ## Example
//!
//! ```rust
//! use fenestra_core::quote::{to_quote_request, QuoteConfiguration};
//!
//! let config = QuoteConfiguration {
//!     material_cost: 100_000.0,
//!     transportation_cost: 5_000.0,
//!     discount: 2_000.0,
//!     total_quote: 103_000.0,
//!     ..Default::default()
//! };
//! let request = to_quote_request(&config);
//! assert_eq!(request.items.len(), 2);
//! assert_eq!(request.subtotal, 105_000.0);
//! assert_eq!(request.tax, 0.0);
//! ```

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Project name used when neither the quote nor the form has one
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

/// Site address used when neither the quote nor the form has one
pub const DEFAULT_SITE_ADDRESS: &str = "Site address not provided";

/// Label of the charge line carrying tax
pub const TAX_CHARGE_LABEL: &str = "Tax (VAT)";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email pattern")
});

// ============================================================================
// Shared Shapes
// ============================================================================

/// A priced line. Shared by quote requests and quote responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_price: f64,
}

impl CostItem {
    /// Single-quantity line priced at `amount`
    pub fn lump_sum(description: impl Into<String>, amount: f64) -> Self {
        CostItem {
            description: description.into(),
            quantity: 1.0,
            unit_price: amount,
            total_price: amount,
        }
    }
}

/// Display tag for a cost line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostItemType {
    Material,
    Labour,
    Transportation,
    Miscellaneous,
}

impl CostItemType {
    /// Infer the tag from a line description
    pub fn from_description(description: &str) -> Self {
        let d = description.to_lowercase();
        if d.contains("material") {
            CostItemType::Material
        } else if d.contains("labour") || d.contains("labor") || d.contains("installation") {
            CostItemType::Labour
        } else if d.contains("transport") || d.contains("delivery") {
            CostItemType::Transportation
        } else {
            CostItemType::Miscellaneous
        }
    }
}

// ============================================================================
// Outbound
// ============================================================================

/// Quote configuration as captured by the quote form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteConfiguration {
    pub project_id: Option<String>,
    pub project_name: String,
    pub site_address: String,
    pub customer_name: String,
    /// Email or phone, as typed
    pub customer_contact: String,
    pub material_cost: f64,
    pub labour_cost: f64,
    pub transportation_cost: f64,
    pub miscellaneous: f64,
    pub discount: f64,
    /// Grand total shown to the user
    pub total_quote: f64,
    pub notes: Option<String>,
}

/// Request body for the quote creation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    pub items: Vec<CostItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Build the quote creation request from the quote form.
pub fn to_quote_request(config: &QuoteConfiguration) -> QuoteRequest {
    let items: Vec<CostItem> = [
        ("Material Cost", config.material_cost),
        ("Labour Cost", config.labour_cost),
        ("Transportation", config.transportation_cost),
        ("Miscellaneous", config.miscellaneous),
    ]
    .into_iter()
    .filter(|(_, amount)| *amount > 0.0)
    .map(|(description, amount)| CostItem::lump_sum(description, amount))
    .collect();

    let subtotal: f64 = items.iter().map(|i| i.total_price).sum();
    let tax = (config.total_quote - subtotal + config.discount).max(0.0);

    let contact = config.customer_contact.trim();
    let customer_email = if EMAIL_PATTERN.is_match(contact) {
        Some(contact.to_string())
    } else {
        if !contact.is_empty() {
            tracing::debug!("customer contact is not an email, dropping it from the request");
        }
        None
    };

    tracing::info!(items = items.len(), subtotal, tax, total = config.total_quote, "quote request assembled");

    QuoteRequest {
        project_id: config.project_id.clone(),
        customer_name: config.customer_name.clone(),
        customer_email,
        items,
        subtotal,
        tax,
        discount: config.discount,
        total: config.total_quote,
        notes: config.notes.clone(),
    }
}

// ============================================================================
// Inbound
// ============================================================================

/// Project linked to a stored quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedProject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub site_address: Option<String>,
}

/// Quote as returned by the quote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: String,
    #[serde(default)]
    pub quote_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<CostItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    #[serde(default)]
    pub project: Option<LinkedProject>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
}

/// Cost line as displayed, with a client-local id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCostItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub item_type: CostItemType,
    #[serde(flatten)]
    pub item: CostItem,
}

/// Extra charge shown below the item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeLine {
    pub label: String,
    pub amount: f64,
}

/// Display view model for a stored quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePreview {
    pub quote_id: String,
    pub quote_number: Option<String>,
    pub project_name: String,
    pub site_address: String,
    pub customer_name: String,
    pub items: Vec<DisplayCostItem>,
    pub charges: Vec<ChargeLine>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
}

fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Build the display view model for a stored quote.
///
/// Project name and site address fall back from the linked project to the
/// configuration that created the quote, then to generic defaults.
pub fn to_quote_preview(response: &QuoteResponse, original: Option<&QuoteConfiguration>) -> QuotePreview {
    let project = response.project.as_ref();

    let project_name = first_non_empty([
        project.and_then(|p| p.name.as_deref()),
        original.map(|c| c.project_name.as_str()),
    ])
    .unwrap_or(DEFAULT_PROJECT_NAME)
    .to_string();

    let site_address = first_non_empty([
        project.and_then(|p| p.site_address.as_deref()),
        original.map(|c| c.site_address.as_str()),
    ])
    .unwrap_or(DEFAULT_SITE_ADDRESS)
    .to_string();

    let customer_name = first_non_empty([
        response.customer_name.as_deref(),
        original.map(|c| c.customer_name.as_str()),
    ])
    .unwrap_or_default()
    .to_string();

    let items = response
        .items
        .iter()
        .map(|item| DisplayCostItem {
            id: Uuid::new_v4(),
            item_type: CostItemType::from_description(&item.description),
            item: item.clone(),
        })
        .collect();

    let charges = if response.tax != 0.0 {
        vec![ChargeLine {
            label: TAX_CHARGE_LABEL.to_string(),
            amount: response.tax,
        }]
    } else {
        Vec::new()
    };

    QuotePreview {
        quote_id: response.id.clone(),
        quote_number: response.quote_number.clone(),
        project_name,
        site_address,
        customer_name,
        items,
        charges,
        subtotal: response.subtotal,
        discount: response.discount,
        total: response.total,
        created_at: response.created_at,
        valid_until: response.valid_until,
    }
}
