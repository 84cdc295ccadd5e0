//! Cart widgets: the cart page, its line items and footer, the header icon
//! and the "added to cart" popup.

mod add;
mod footer;
mod icon;
mod item;
mod notification;
mod sync;
mod totals;

pub use add::add_item;
pub use footer::{CartFooter, FooterBlock};
pub use icon::CartIcon;
pub use item::CartItem;
pub use notification::{CartNotification, NotificationAction, NotificationContent};
pub use sync::{BatchOutcome, CartWidget};
pub use totals::{CartTotalsView, TAX_AT_CHECKOUT};
