//! Variant selection: resolution, display projection, purchase gating and
//! the selector widget tying them together.

pub mod availability;
pub mod gate;
pub mod resolver;
mod selector;

pub use availability::{AvailabilityView, QuantityPolicy, StockLabel};
pub use gate::{PurchaseGate, PurchaseRejection, PurchaseRequest};
pub use resolver::{resolve, Resolution, Selection};
pub use selector::VariantSelector;
