//! "Added to cart" popup.

use std::time::Duration;

use storefront_core::{format_money, LineItem};
use tokio::time::Instant;

use crate::context::WidgetContext;
use crate::events::AppEvent;
use crate::html::escape_html;

const SECTION_ID: &str = "cart-notification";

/// Filled-in popup fields for the last added line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub name: String,
    pub variant_title: String,
    /// `+<added quantity>`.
    pub added: String,
    pub unit_price: String,
    /// Quantity of the line now in the cart.
    pub cart_quantity: u32,
    pub line_total: String,
    pub image: Option<String>,
}

impl NotificationContent {
    #[must_use]
    pub fn from_line(item: &LineItem, added_qty: u32, currency: &str) -> Self {
        Self {
            name: non_empty(&item.product_title).unwrap_or("Product Name").to_string(),
            variant_title: item
                .variant_title
                .as_deref()
                .and_then(non_empty)
                .unwrap_or("Default variant")
                .to_string(),
            added: format!("+{}", added_qty.max(1)),
            unit_price: format_money(item.price, currency),
            cart_quantity: item.quantity,
            line_total: format_money(item.final_line_price, currency),
            image: item.image.clone(),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.trim().is_empty()).then_some(s)
}

/// Actions that dismiss the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Close,
    ViewCart,
    Checkout,
}

pub struct CartNotification {
    ctx: WidgetContext,
    auto_hide: Duration,
    section_html: Option<String>,
    content: Option<NotificationContent>,
    hide_at: Option<Instant>,
}

impl CartNotification {
    #[must_use]
    pub fn new(ctx: WidgetContext) -> Self {
        let auto_hide = Duration::from_millis(ctx.settings.notification.auto_hide_ms);
        Self {
            ctx,
            auto_hide,
            section_html: None,
            content: None,
            hide_at: None,
        }
    }

    /// Reacts to `product:cart:notification:changed`: reloads the section,
    /// fills in the added line and shows the popup. Events without an item
    /// are ignored, as is every other event. Returns whether it is now shown.
    pub async fn handle(&mut self, event: &AppEvent) -> bool {
        let AppEvent::CartNotification {
            item: Some(item),
            added_qty,
        } = event
        else {
            return false;
        };

        match self.ctx.client.fetch_section(SECTION_ID).await {
            Ok(html) => self.section_html = Some(html),
            Err(e) => {
                tracing::error!(error = %e, "cart notification section failed to load");
                return false;
            }
        }

        self.content = Some(NotificationContent::from_line(
            item,
            *added_qty,
            &self.ctx.currency,
        ));
        self.hide_at = Some(Instant::now() + self.auto_hide);
        tracing::debug!(variant_id = item.variant_id(), "showing cart notification");
        true
    }

    pub fn act(&mut self, action: NotificationAction) {
        tracing::trace!(?action, "cart notification dismissed");
        self.hide();
    }

    pub fn hide(&mut self) {
        self.hide_at = None;
    }

    /// Hides once the auto-hide deadline has passed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.hide_at.is_some_and(|deadline| deadline <= now) {
            self.hide();
            return true;
        }
        false
    }

    /// Sleeps until the auto-hide deadline and hides. Returns immediately
    /// when not shown.
    pub async fn auto_hide(&mut self) {
        if let Some(deadline) = self.hide_at {
            tokio::time::sleep_until(deadline).await;
            self.expire(Instant::now());
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.hide_at.is_some()
    }

    #[must_use]
    pub fn content(&self) -> Option<&NotificationContent> {
        self.content.as_ref()
    }

    /// Last fetched `cart-notification` section markup.
    #[must_use]
    pub fn section_html(&self) -> Option<&str> {
        self.section_html.as_deref()
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        let hidden = if self.is_visible() { "" } else { " hidden" };
        let Some(content) = &self.content else {
            return format!("<div id=\"cart-notif\" class=\"cart-notification{hidden}\"></div>");
        };
        let image = content
            .image
            .as_deref()
            .map(|src| {
                format!(
                    "<img src=\"{}\" alt=\"{}\" />",
                    escape_html(src),
                    escape_html(&content.name)
                )
            })
            .unwrap_or_default();
        format!(
            concat!(
                "<div id=\"cart-notif\" class=\"cart-notification{hidden}\">",
                "<div class=\"header\"><span>Added to cart</span>",
                "<button class=\"close-btn\" aria-label=\"Close\">&times;</button></div>",
                "<div class=\"body\">{image}<div class=\"details\">",
                "<div id=\"cart-notif-name\">{name}</div>",
                "<div id=\"cart-notif-variant\">{variant}</div>",
                "<div id=\"cart-notif-added-qty\">{added}</div>",
                "<div id=\"cart-notif-unit-price\">{unit}</div>",
                "<div id=\"cart-notif-cart-qty\">{qty}</div>",
                "<div id=\"cart-notif-cart-total\">{total}</div>",
                "</div></div>",
                "<div class=\"actions\"><a class=\"cart\" href=\"/cart\">View My Cart</a>",
                "<a class=\"checkout\" href=\"/checkout\">Checkout</a></div></div>"
            ),
            hidden = hidden,
            image = image,
            name = escape_html(&content.name),
            variant = escape_html(&content.variant_title),
            added = content.added,
            unit = escape_html(&content.unit_price),
            qty = content.cart_quantity,
            total = escape_html(&content.line_total),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_falls_back_for_missing_titles() {
        let item = LineItem {
            id: 3,
            quantity: 4,
            price: 1250,
            final_line_price: 5000,
            ..LineItem::default()
        };
        let content = NotificationContent::from_line(&item, 0, "USD");
        assert_eq!(content.name, "Product Name");
        assert_eq!(content.variant_title, "Default variant");
        assert_eq!(content.added, "+1");
        assert_eq!(content.unit_price, "$12.50");
        assert_eq!(content.cart_quantity, 4);
        assert_eq!(content.line_total, "$50.00");
    }

    #[test]
    fn content_uses_line_titles() {
        let item = LineItem {
            id: 3,
            quantity: 2,
            product_title: "Shirt".to_string(),
            variant_title: Some("Red / L".to_string()),
            ..LineItem::default()
        };
        let content = NotificationContent::from_line(&item, 2, "USD");
        assert_eq!(content.name, "Shirt");
        assert_eq!(content.variant_title, "Red / L");
        assert_eq!(content.added, "+2");
    }
}
