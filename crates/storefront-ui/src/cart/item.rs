//! One editable cart line.

use storefront_core::attributes::parse_integer;
use storefront_core::{format_money, LineItem};

use crate::events::{AppEvent, EventBus};
use crate::html::escape_html;

#[derive(Debug, Clone)]
pub struct CartItem {
    bus: EventBus,
    pub variant_id: u64,
    /// Zero-based position in the cart.
    pub line_index: usize,
    pub quantity: u32,
    pub product_title: String,
    pub variant_title: String,
    pub product_url: Option<String>,
    pub image: Option<String>,
    /// Formatted unit price.
    pub unit_price: String,
    /// Formatted line total.
    pub line_price: String,
}

impl CartItem {
    /// Item for the line at `line_index` of a fetched cart.
    #[must_use]
    pub fn from_line(bus: EventBus, line_index: usize, line: &LineItem, currency: &str) -> Self {
        Self {
            bus,
            variant_id: line.variant_id(),
            line_index,
            quantity: line.quantity,
            product_title: line.product_title.clone(),
            variant_title: line.variant_title.clone().unwrap_or_default(),
            product_url: line.url.clone(),
            image: line.image.clone(),
            unit_price: format_money(line.price, currency),
            line_price: format_money(line.final_line_price, currency),
        }
    }

    /// Item built from element attributes (`variant-id`, `line-index`,
    /// `quantity`, `product-title`, ...). Returns `None` when the variant id
    /// or line index is missing or not a number.
    pub fn from_attributes<'a, F>(bus: EventBus, lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let number = |name: &str| lookup(name).and_then(parse_integer).filter(|n| *n >= 0);
        let Some(variant_id) = number("variant-id").and_then(|n| u64::try_from(n).ok()) else {
            tracing::warn!("cart item without a valid variant-id");
            return None;
        };
        let Some(line_index) = number("line-index").and_then(|n| usize::try_from(n).ok()) else {
            tracing::warn!(variant_id, "cart item without a valid line-index");
            return None;
        };
        let text = |name: &str| lookup(name).unwrap_or_default().to_string();

        Some(Self {
            bus,
            variant_id,
            line_index,
            quantity: number("quantity")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
            product_title: text("product-title"),
            variant_title: text("variant-title"),
            product_url: lookup("product-url").map(str::to_string),
            image: lookup("image-src")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            unit_price: text("final-price"),
            line_price: text("line-price"),
        })
    }

    /// Quantity input changed. Values below 1 or non-numeric are ignored;
    /// otherwise `quantity-change` is published and the new value returned.
    pub fn change_quantity(&mut self, raw: &str) -> Option<u32> {
        let quantity = parse_integer(raw)
            .filter(|n| *n >= 1)
            .and_then(|n| u32::try_from(n).ok())?;
        self.quantity = quantity;
        self.bus.emit(AppEvent::QuantityChange {
            variant_id: self.variant_id,
            quantity,
        });
        Some(quantity)
    }

    /// Remove button: publishes `remove-item` for this line.
    pub fn remove(&self) {
        self.bus.emit(AppEvent::RemoveItem {
            line_index: self.line_index,
        });
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        let url = escape_html(self.product_url.as_deref().unwrap_or("#"));
        let title = escape_html(&self.product_title);
        let image = match &self.image {
            Some(src) => format!(
                "<img src=\"{}\" alt=\"{title}\" loading=\"lazy\" decoding=\"async\" />",
                escape_html(src)
            ),
            None => "<div class=\"no-image\">No Image</div>".to_string(),
        };
        format!(
            concat!(
                "<div class=\"cart-item\" data-line-index=\"{index}\">",
                "<div class=\"item-info\"><a href=\"{url}\">{image}</a>",
                "<div class=\"item-details\"><a href=\"{url}\">{title}</a>",
                "<span>{variant}</span><span>{unit} each</span></div></div>",
                "<div class=\"quantity\"><input type=\"number\" class=\"qty-input\" ",
                "value=\"{quantity}\" min=\"1\" id=\"qty-input-{index}\" data-index=\"{index}\" /></div>",
                "<div class=\"total\"><span>{total}</span></div>",
                "<div class=\"remove\"><a class=\"remove-btn\" data-index=\"{index}\" title=\"Remove item\">&times;</a></div>",
                "</div>"
            ),
            index = self.line_index,
            url = url,
            image = image,
            title = title,
            variant = escape_html(&self.variant_title),
            unit = escape_html(&self.unit_price),
            quantity = self.quantity,
            total = escape_html(&self.line_price),
        )
    }
}
