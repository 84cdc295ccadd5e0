//! Cart footer: notes field, totals and action buttons, laid out by blocks.

use storefront_core::attributes::parse_json_list;
use storefront_core::settings::CartFooterSettings;
use storefront_core::Cart;

use super::totals::CartTotalsView;
use crate::html::escape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterBlock {
    Subtotal,
    UpdateButton,
    CheckoutButton,
    /// Theme block this widget does not know; renders nothing.
    Unknown(String),
}

impl FooterBlock {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "subtotal" => Self::Subtotal,
            "update_button" => Self::UpdateButton,
            "checkout_button" => Self::CheckoutButton,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartFooter {
    blocks: Vec<FooterBlock>,
    totals: Option<CartTotalsView>,
    note: String,
}

impl CartFooter {
    /// Blocks come from the `blocks` attribute when present, otherwise from
    /// settings. Malformed JSON yields no blocks.
    #[must_use]
    pub fn new(blocks_attribute: Option<&str>, settings: &CartFooterSettings) -> Self {
        let names: Vec<String> = match blocks_attribute {
            Some(raw) => parse_json_list(Some(raw), "blocks"),
            None => settings.blocks.clone(),
        };
        Self {
            blocks: names.iter().map(|name| FooterBlock::parse(name)).collect(),
            totals: None,
            note: String::new(),
        }
    }

    /// Re-derives totals and the note from a fresh cart.
    pub fn update(&mut self, cart: &Cart) {
        self.totals = Some(CartTotalsView::project(cart));
        self.note = cart.note.clone().unwrap_or_default();
    }

    pub fn set_note(&mut self, note: &str) {
        note.clone_into(&mut self.note);
    }

    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    #[must_use]
    pub fn blocks(&self) -> &[FooterBlock] {
        &self.blocks
    }

    #[must_use]
    pub fn totals(&self) -> Option<&CartTotalsView> {
        self.totals.as_ref()
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        let mut html = format!(
            concat!(
                "<div class=\"container\"><div><label for=\"cart_notes\">Cart notes</label>",
                "<textarea id=\"cart_notes\" name=\"note\" placeholder=\"Add special instructions or notes\">{}</textarea>",
                "</div><div>"
            ),
            escape_html(&self.note)
        );
        for block in &self.blocks {
            match block {
                FooterBlock::Subtotal => {
                    if let Some(totals) = &self.totals {
                        html.push_str(&render_subtotal(totals));
                    }
                }
                FooterBlock::UpdateButton => html.push_str(
                    "<button id=\"update-cart-button\" type=\"submit\" name=\"update\" class=\"update\">Update</button>",
                ),
                FooterBlock::CheckoutButton => html.push_str(
                    "<button type=\"submit\" name=\"checkout\" class=\"checkout\">Checkout</button><div class=\"secure-checkout\"><span>Secure checkout</span></div>",
                ),
                FooterBlock::Unknown(_) => {}
            }
        }
        html.push_str("</div></div>");
        html
    }
}

fn render_subtotal(totals: &CartTotalsView) -> String {
    let mut html = format!(
        concat!(
            "<p class=\"discount-hint\">Have a discount code? You can apply it at checkout.</p>",
            "<h3 class=\"subtotal-text\" id=\"subtotal-price\">{}</h3>",
            "<p class=\"tax-text\" id=\"tax-price\">{}</p>"
        ),
        escape_html(&totals.subtotal),
        escape_html(&totals.tax),
    );
    if !totals.total.is_empty() {
        html.push_str(&format!(
            "<p class=\"subtotal-text\" id=\"total-price\">{}</p>",
            escape_html(&totals.total)
        ));
    }
    html
}
