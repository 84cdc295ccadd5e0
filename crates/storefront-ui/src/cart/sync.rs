//! Cart page widget: line edits, removal and reconciliation with the
//! platform's cart.
//!
//! Displayed totals and visibility always come from the last cart fetched
//! from `/cart.js`, never from locally applied edits.

use std::collections::BTreeMap;

use storefront_client::{CartUpdate, ClientError};
use storefront_core::attributes::parse_integer;
use storefront_core::Cart;

use super::item::CartItem;
use super::totals::CartTotalsView;
use crate::context::WidgetContext;
use crate::error::WidgetError;
use crate::events::AppEvent;

const UPDATE_FAILED: &str = "Error updating cart";
const REMOVE_FAILED: &str = "Error removing item";
const LOAD_FAILED: &str = "Error loading cart";

/// Result of [`CartWidget::submit_updates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Edits the platform accepted before the loop ended.
    pub applied: usize,
    /// Edits that were staged when the batch started.
    pub staged: usize,
}

pub struct CartWidget {
    ctx: WidgetContext,
    cart: Option<Cart>,
    /// Line index to requested quantity, submitted in ascending order.
    pending: BTreeMap<usize, u32>,
}

impl CartWidget {
    #[must_use]
    pub fn new(ctx: WidgetContext) -> Self {
        Self {
            ctx,
            cart: None,
            pending: BTreeMap::new(),
        }
    }

    /// Mounts the widget and loads the cart. A failed load has already been
    /// reported; the widget stays empty until the next reconciliation.
    pub async fn connect(ctx: WidgetContext) -> Self {
        let mut widget = Self::new(ctx);
        let _ = widget.reconcile().await;
        widget
    }

    /// Last reconciled cart, if any load has succeeded.
    #[must_use]
    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    #[must_use]
    pub fn pending(&self) -> &BTreeMap<usize, u32> {
        &self.pending
    }

    /// Records a quantity edit for line `index` without sending it. Input
    /// below 1 or non-numeric is coerced to 1. Returns the staged quantity.
    pub fn stage_quantity(&mut self, index: usize, raw: &str) -> u32 {
        let quantity = parse_integer(raw)
            .filter(|n| *n >= 1)
            .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX));
        self.pending.insert(index, quantity);
        tracing::debug!(index, quantity, "staged quantity edit");
        quantity
    }

    /// Reacts to events from cart items: `quantity-change` stages an edit
    /// for the line holding that variant; `remove-item` removes the line.
    ///
    /// # Errors
    ///
    /// Propagates a failed removal.
    pub async fn handle(&mut self, event: &AppEvent) -> Result<(), WidgetError> {
        match event {
            AppEvent::QuantityChange {
                variant_id,
                quantity,
            } => {
                let index = self.cart.as_ref().and_then(|cart| {
                    cart.items
                        .iter()
                        .position(|item| item.variant_id() == *variant_id)
                });
                match index {
                    Some(index) => {
                        self.stage_quantity(index, &quantity.to_string());
                    }
                    None => tracing::warn!(variant_id, "quantity change for unknown cart line"),
                }
                Ok(())
            }
            AppEvent::RemoveItem { line_index } => self.remove_item(*line_index).await,
            _ => Ok(()),
        }
    }

    /// Sends every pending edit as its own `/cart/change.js` call, one at a
    /// time in ascending line order, publishing the item count after each.
    /// The first failure ends the loop. Exactly one reconciliation follows.
    ///
    /// # Errors
    ///
    /// The failed change, or the failed reconciliation when every change
    /// went through. One danger toast is published either way.
    pub async fn submit_updates(&mut self) -> Result<BatchOutcome, WidgetError> {
        let edits: Vec<(usize, u32)> = self.pending.iter().map(|(i, q)| (*i, *q)).collect();
        if edits.is_empty() {
            return Ok(BatchOutcome {
                applied: 0,
                staged: 0,
            });
        }

        let mut applied = 0;
        let mut failure: Option<ClientError> = None;
        for (index, quantity) in &edits {
            let line = index + 1;
            match self.ctx.client.change_line(line, *quantity).await {
                Ok(cart) => {
                    applied += 1;
                    self.ctx.bus.emit(AppEvent::CartChanged {
                        count: cart.item_count,
                    });
                }
                Err(e) => {
                    tracing::error!(line, quantity, error = %e, "cart line update failed; stopping batch");
                    failure = Some(e);
                    break;
                }
            }
        }

        if failure.is_none() {
            self.pending.clear();
        }
        let reloaded = match self.fetch_snapshot().await {
            Ok(cart) => {
                self.store(cart);
                Ok(())
            }
            Err(e) => Err(e),
        };

        tracing::info!(applied, staged = edits.len(), "cart batch update finished");
        if let Some(e) = failure {
            self.ctx.toast_error(UPDATE_FAILED);
            return Err(e.into());
        }
        if let Err(e) = reloaded {
            self.ctx.toast_error(LOAD_FAILED);
            return Err(e.into());
        }
        Ok(BatchOutcome {
            applied,
            staged: edits.len(),
        })
    }

    /// Sets line `index` to quantity 0, publishes the new count and
    /// reconciles.
    ///
    /// # Errors
    ///
    /// The failed change or reconciliation, after a danger toast.
    pub async fn remove_item(&mut self, index: usize) -> Result<(), WidgetError> {
        let line = index + 1;
        let cart = match self.ctx.client.change_line(line, 0).await {
            Ok(cart) => cart,
            Err(e) => {
                tracing::error!(line, error = %e, "cart line removal failed");
                self.ctx.toast_error(REMOVE_FAILED);
                return Err(e.into());
            }
        };
        self.ctx.bus.emit(AppEvent::CartChanged {
            count: cart.item_count,
        });
        self.reconcile().await.map(|_| ())
    }

    /// Re-fetches `/cart.js` and replaces the snapshot. A successful load
    /// also drops any pending edits.
    ///
    /// # Errors
    ///
    /// The failed fetch, after a danger toast.
    pub async fn reconcile(&mut self) -> Result<&Cart, WidgetError> {
        match self.fetch_snapshot().await {
            Ok(cart) => Ok(self.store(cart)),
            Err(e) => {
                self.ctx.toast_error(LOAD_FAILED);
                Err(e.into())
            }
        }
    }

    /// Saves the cart note (`/cart/update.js`).
    ///
    /// # Errors
    ///
    /// The failed update, after a danger toast.
    pub async fn update_note(&mut self, note: &str) -> Result<&Cart, WidgetError> {
        self.apply_update(&CartUpdate::note(note)).await
    }

    /// Saves cart attributes (`/cart/update.js`).
    ///
    /// # Errors
    ///
    /// The failed update, after a danger toast.
    pub async fn update_attributes<I, K, V>(&mut self, attributes: I) -> Result<&Cart, WidgetError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let update = attributes
            .into_iter()
            .fold(CartUpdate::default(), |update, (k, v)| update.attribute(k, v));
        self.apply_update(&update).await
    }

    #[must_use]
    pub fn totals(&self) -> Option<CartTotalsView> {
        self.cart.as_ref().map(CartTotalsView::project)
    }

    /// Items of the current snapshot, wired to this page's bus.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        let Some(cart) = &self.cart else {
            return Vec::new();
        };
        cart.items
            .iter()
            .enumerate()
            .map(|(index, line)| {
                CartItem::from_line(self.ctx.bus.clone(), index, line, &cart.currency)
            })
            .collect()
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        let Some(totals) = self.totals() else {
            return "<div id=\"cart-content\" style=\"display:none\"></div>".to_string();
        };
        let (content, empty) = if totals.is_empty {
            ("none", "flex")
        } else {
            ("block", "none")
        };
        let items: String = self.items().iter().map(CartItem::render_html).collect();
        format!(
            concat!(
                "<div id=\"cart-content\" style=\"display:{content}\">",
                "<div id=\"cart-items\">{items}</div>",
                "<p id=\"subtotal-price\">{subtotal}</p>",
                "<p id=\"tax-price\">{tax}</p>",
                "<p id=\"total-price\">{total}</p></div>",
                "<div id=\"empty-cart-message\" style=\"display:{empty}\">Your cart is empty</div>"
            ),
            content = content,
            items = items,
            subtotal = totals.subtotal,
            tax = totals.tax,
            total = totals.total,
            empty = empty,
        )
    }

    async fn apply_update(&mut self, update: &CartUpdate) -> Result<&Cart, WidgetError> {
        match self.ctx.client.update_cart(update).await {
            Ok(cart) => Ok(self.cart.insert(cart)),
            Err(e) => {
                tracing::error!(error = %e, "cart update failed");
                self.ctx.toast_error(UPDATE_FAILED);
                Err(e.into())
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<Cart, ClientError> {
        let cart = self
            .ctx
            .client
            .fetch_cart()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "cart reload failed"))?;
        tracing::debug!(item_count = cart.item_count, "cart reconciled");
        Ok(cart)
    }

    /// Replaces the snapshot; pending edits no longer apply to it.
    fn store(&mut self, cart: Cart) -> &Cart {
        self.pending.clear();
        self.cart.insert(cart)
    }
}
