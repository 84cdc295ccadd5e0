//! Display state derived from the resolved variant.

use storefront_core::attributes::parse_integer;
use storefront_core::settings::QuantitySettings;
use storefront_core::{format_money, Variant};

/// Quantity input behaviour when an available variant is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityPolicy {
    pub baseline: u32,
    /// `None` leaves the input unbounded.
    pub max: Option<u32>,
}

impl Default for QuantityPolicy {
    fn default() -> Self {
        Self {
            baseline: 1,
            max: None,
        }
    }
}

impl From<&QuantitySettings> for QuantityPolicy {
    fn from(settings: &QuantitySettings) -> Self {
        Self {
            baseline: settings.baseline,
            max: settings.max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLabel {
    InStock,
    OutOfStock,
    NotAvailable,
}

impl StockLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "In stock",
            Self::OutOfStock => "Out of stock",
            Self::NotAvailable => "Variant not available",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityView {
    pub quantity_enabled: bool,
    pub quantity: u32,
    /// `Some(0)` when nothing can be bought; `None` when unbounded.
    pub max_quantity: Option<u32>,
    pub stock: StockLabel,
    pub price: Option<String>,
    /// Shown only when strictly greater than the price.
    pub compare_at_price: Option<String>,
    pub on_sale: bool,
}

impl AvailabilityView {
    #[must_use]
    pub fn project(variant: Option<&Variant>, policy: &QuantityPolicy, currency: &str) -> Self {
        let Some(variant) = variant else {
            return Self {
                quantity_enabled: false,
                quantity: 0,
                max_quantity: Some(0),
                stock: StockLabel::NotAvailable,
                price: None,
                compare_at_price: None,
                on_sale: false,
            };
        };

        let on_sale = variant.is_on_sale();
        let price = Some(format_money(variant.price, currency));
        let compare_at_price = variant
            .compare_at_price
            .filter(|_| on_sale)
            .map(|cents| format_money(cents, currency));

        if variant.available {
            let quantity = policy
                .max
                .map_or(policy.baseline, |max| policy.baseline.min(max));
            Self {
                quantity_enabled: true,
                quantity,
                max_quantity: policy.max,
                stock: StockLabel::InStock,
                price,
                compare_at_price,
                on_sale,
            }
        } else {
            Self {
                quantity_enabled: false,
                quantity: 0,
                max_quantity: Some(0),
                stock: StockLabel::OutOfStock,
                price,
                compare_at_price,
                on_sale,
            }
        }
    }

    /// Normalizes typed quantity input: non-numeric or negative becomes 0,
    /// and values above the maximum are capped.
    #[must_use]
    pub fn clamp_quantity(&self, raw: &str) -> u32 {
        if !self.quantity_enabled {
            return 0;
        }
        let value = parse_integer(raw)
            .filter(|n| *n >= 0)
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX));
        self.max_quantity.map_or(value, |max| value.min(max))
    }
}
