//! Product variants and options as rendered into widget attributes.
//!
//! The theme serializes `product.variants` and `product.options` to JSON.
//! Prices are integer cents; `compare_at_price` is `null` when no sale price
//! is configured.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A concrete purchasable SKU: one value per option axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: u64,
    /// Display title, e.g. `"Red / Large"`.
    #[serde(default)]
    pub title: String,
    /// One value per product option, in option order.
    pub options: Vec<String>,
    /// Price in cents.
    pub price: i64,
    /// Pre-sale price in cents, or `None` when not configured.
    #[serde(default)]
    pub compare_at_price: Option<i64>,
    /// Defaults to `true` when absent.
    #[serde(default = "default_available")]
    pub available: bool,
    /// Media shown when this variant is selected.
    #[serde(default)]
    pub featured_media: Option<MediaRef>,
}

impl Variant {
    /// `true` when a compare-at price exists and exceeds the current price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price.is_some_and(|c| c > self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: u64,
}

fn default_available() -> bool {
    true
}

/// A product's option names and its consistent set of variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    options: Vec<String>,
    variants: Vec<Variant>,
}

impl Product {
    /// Builds a product, dropping variants whose option count does not match
    /// `options.len()` and variants that repeat an earlier id.
    #[must_use]
    pub fn new(options: Vec<String>, variants: Vec<Variant>) -> Self {
        let option_count = options.len();
        let mut seen = HashSet::new();
        let variants = variants
            .into_iter()
            .filter(|variant| {
                if variant.options.len() != option_count {
                    tracing::warn!(
                        variant_id = variant.id,
                        expected = option_count,
                        actual = variant.options.len(),
                        "dropping variant with mismatched option count"
                    );
                    return false;
                }
                if !seen.insert(variant.id) {
                    tracing::warn!(variant_id = variant.id, "dropping duplicate variant id");
                    return false;
                }
                true
            })
            .collect();
        Self { options, variants }
    }

    /// Builds a product from the raw `options` and `variants` attributes,
    /// treating malformed JSON as empty.
    #[must_use]
    pub fn from_attributes(options: Option<&str>, variants: Option<&str>) -> Self {
        Self::new(
            crate::attributes::parse_json_list(options, "options"),
            crate::attributes::parse_json_list(variants, "variants"),
        )
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    #[must_use]
    pub fn variant(&self, id: u64) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Distinct values observed at `index` across all variants, first-seen order.
    #[must_use]
    pub fn option_values(&self, index: usize) -> Vec<&str> {
        distinct_values(self.variants.iter(), index)
    }
}

/// Distinct option values at `index`, preserving first-seen order.
pub fn distinct_values<'a, I>(variants: I, index: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Variant>,
{
    let mut values: Vec<&str> = Vec::new();
    for variant in variants {
        if let Some(value) = variant.options.get(index) {
            if !values.contains(&value.as_str()) {
                values.push(value);
            }
        }
    }
    values
}
