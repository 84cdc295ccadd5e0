//! Add-to-cart shared by every entry point that buys a variant.

use storefront_core::Cart;

use crate::context::WidgetContext;
use crate::error::WidgetError;
use crate::events::AppEvent;
use crate::variant::PurchaseRequest;

const ADD_TO_CART_FAILED: &str = "Error adding to cart";

/// Adds a gated request to the cart, re-fetches the cart and announces the
/// new count and the added line.
///
/// # Errors
///
/// [`WidgetError::Client`] when the add or the follow-up fetch fails, after
/// a danger toast. Nothing is announced in that case.
pub async fn add_item(
    ctx: &WidgetContext,
    request: PurchaseRequest,
) -> Result<Cart, WidgetError> {
    let result = async {
        ctx.client
            .add_item(request.variant_id, request.quantity)
            .await?;
        ctx.client.fetch_cart().await
    }
    .await;

    match result {
        Ok(cart) => {
            tracing::info!(
                variant_id = request.variant_id,
                quantity = request.quantity,
                item_count = cart.item_count,
                "added to cart"
            );
            ctx.bus.emit(AppEvent::CartChanged {
                count: cart.item_count,
            });
            ctx.bus.emit(AppEvent::CartNotification {
                item: cart.find_variant(request.variant_id).cloned(),
                added_qty: request.quantity,
            });
            Ok(cart)
        }
        Err(e) => {
            tracing::error!(variant_id = request.variant_id, error = %e, "add to cart failed");
            ctx.toast_error(ADD_TO_CART_FAILED);
            Err(e.into())
        }
    }
}
