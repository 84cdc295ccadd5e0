//! Headless storefront widgets.
//!
//! Each widget owns its state, reacts to [`AppEvent`]s from a shared
//! [`EventBus`] and renders its markup as an HTML string. Network work goes
//! through the [`WidgetContext`]'s client.

pub mod carousel;
pub mod cart;
pub mod collection;
pub mod context;
pub mod error;
pub mod events;
pub mod gallery;
pub mod html;
pub mod loading_bar;
pub mod page;
pub mod toast;
pub mod variant;

pub use carousel::{Carousel, Direction, Slide};
pub use cart::{CartFooter, CartIcon, CartItem, CartNotification, CartWidget};
pub use collection::{CollectionFilters, CollectionGrid, FilterForm};
pub use context::WidgetContext;
pub use error::WidgetError;
pub use events::{AppEvent, EventBus, EventStream};
pub use gallery::{ImageGallery, Thumbnail};
pub use loading_bar::LoadingBar;
pub use toast::{Toast, ToastKind, ToastStack};
pub use variant::{PurchaseGate, PurchaseRejection, VariantSelector};
