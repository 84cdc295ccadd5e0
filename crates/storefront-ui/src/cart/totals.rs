//! Subtotal, tax and total lines derived from a cart snapshot.

use storefront_core::{format_money, Cart};

pub const TAX_AT_CHECKOUT: &str = "Taxes and shipping calculated at checkout.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotalsView {
    /// `Subtotal: <items subtotal>`.
    pub subtotal: String,
    /// `Tax: <total tax>` when the cart carries tax lines, otherwise the
    /// calculated-at-checkout notice.
    pub tax: String,
    /// `Total: <total price>` when taxed, otherwise empty.
    pub total: String,
    /// Whether the empty-cart message shows instead of the contents.
    pub is_empty: bool,
}

impl CartTotalsView {
    /// Projects `cart`, formatting money in the cart's own currency.
    #[must_use]
    pub fn project(cart: &Cart) -> Self {
        let money = |cents| format_money(cents, &cart.currency);
        let (tax, total) = if cart.has_tax_lines() {
            (
                format!("Tax: {}", money(cart.total_tax)),
                format!("Total: {}", money(cart.total_price)),
            )
        } else {
            (TAX_AT_CHECKOUT.to_string(), String::new())
        };

        Self {
            subtotal: format!("Subtotal: {}", money(cart.items_subtotal_price)),
            tax,
            total,
            is_empty: cart.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront_core::TaxLine;

    use super::*;

    fn cart(tax_lines: Vec<TaxLine>) -> Cart {
        Cart {
            item_count: 2,
            items_subtotal_price: 2500,
            total_tax: 300,
            total_price: 2800,
            tax_lines,
            currency: "USD".to_string(),
            ..Cart::default()
        }
    }

    #[test]
    fn taxed_cart_shows_tax_and_total() {
        let view = CartTotalsView::project(&cart(vec![TaxLine {
            title: "State".to_string(),
            price: 300,
            rate: 0.12,
        }]));
        assert_eq!(view.subtotal, "Subtotal: $25.00");
        assert_eq!(view.tax, "Tax: $3.00");
        assert_eq!(view.total, "Total: $28.00");
        assert!(!view.is_empty);
    }

    #[test]
    fn untaxed_cart_defers_to_checkout() {
        let view = CartTotalsView::project(&cart(Vec::new()));
        assert_eq!(view.tax, TAX_AT_CHECKOUT);
        assert_eq!(view.total, "");
    }

    #[test]
    fn empty_cart_flags_visibility() {
        let view = CartTotalsView::project(&Cart::default());
        assert!(view.is_empty);
        assert_eq!(view.subtotal, "Subtotal: $0.00");
    }
}
