//! Cart snapshot as returned by the storefront AJAX API (`/cart.js`).
//!
//! The platform owns the cart; these types only hold the most recent
//! response. All money fields are integer cents. Fields the widgets do not
//! read are ignored during deserialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Sum of line quantities.
    pub item_count: u32,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub items_subtotal_price: i64,
    #[serde(default)]
    pub total_price: i64,
    #[serde(default)]
    pub total_tax: i64,
    #[serde(default)]
    pub tax_lines: Vec<TaxLine>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            token: None,
            note: None,
            attributes: serde_json::Map::new(),
            item_count: 0,
            items: Vec::new(),
            items_subtotal_price: 0,
            total_price: 0,
            total_tax: 0,
            tax_lines: Vec::new(),
            currency: default_currency(),
        }
    }
}

impl Cart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Line at zero-based `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// First line holding `variant_id`.
    #[must_use]
    pub fn find_variant(&self, variant_id: u64) -> Option<&LineItem> {
        self.items.iter().find(|item| item.variant_id() == variant_id)
    }

    #[must_use]
    pub fn has_tax_lines(&self) -> bool {
        !self.tax_lines.is_empty()
    }
}

/// One cart entry. `id` is the variant id, as in the platform's payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    #[serde(default)]
    pub variant_id: Option<u64>,
    #[serde(default)]
    pub product_id: Option<u64>,
    /// Line key; stable across quantity changes.
    #[serde(default)]
    pub key: String,
    pub quantity: u32,
    /// Unit price in cents.
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub line_price: i64,
    /// Line total after line-level discounts.
    #[serde(default)]
    pub final_line_price: i64,
    #[serde(default)]
    pub product_title: String,
    #[serde(default)]
    pub variant_title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl LineItem {
    #[must_use]
    pub fn variant_id(&self) -> u64 {
        self.variant_id.unwrap_or(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    pub title: String,
    pub price: i64,
    #[serde(default)]
    pub rate: f64,
}
