//! Header cart icon with an item-count badge.

use storefront_client::StorefrontClient;
use storefront_core::attributes::parse_integer;

use crate::events::AppEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartIcon {
    count: u32,
}

impl CartIcon {
    /// Starts from the server-rendered badge text; junk reads as 0.
    #[must_use]
    pub fn from_badge(text: Option<&str>) -> Self {
        let count = text
            .and_then(parse_integer)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);
        Self { count }
    }

    /// Mounts with the live count from `/cart.js`. A failed fetch leaves the
    /// badge hidden until the next `product:cart:changed`.
    pub async fn connect(client: &StorefrontClient) -> Self {
        match client.fetch_cart().await {
            Ok(cart) => Self {
                count: cart.item_count,
            },
            Err(e) => {
                tracing::warn!(error = %e, "cart icon could not load cart count");
                Self::default()
            }
        }
    }

    /// Applies `product:cart:changed`. Returns whether the count changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::CartChanged { count } if *count != self.count => {
                self.count = *count;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn is_badge_visible(&self) -> bool {
        self.count > 0
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        let hidden = if self.is_badge_visible() { "" } else { " hidden" };
        format!(
            "<a href=\"/cart\" class=\"cart-icon\" aria-label=\"Cart\"><span id=\"badge\" class=\"badge{hidden}\">{}</span></a>",
            self.count
        )
    }
}
