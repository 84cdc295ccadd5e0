//! In-process event bus connecting independently mounted widgets.
//!
//! The bus is constructed once by the host and cloned into every widget that
//! publishes or listens. Each subscriber gets its own buffered stream of
//! every event emitted after it subscribed.

use storefront_core::{LineItem, Variant};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use crate::toast::Toast;

/// Events buffered per subscriber before the oldest are dropped.
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A complete selection resolved to a variant.
    VariantChanged { variant_id: u64 },
    /// Cart item count after a mutation.
    CartChanged { count: u32 },
    /// A variant was added; `item` is its line in the refreshed cart.
    CartNotification {
        item: Option<LineItem>,
        added_qty: u32,
    },
    FiltersChanged,
    /// Selection changed, resolved or not, with the current quantity.
    VariantChange {
        variant_id: Option<u64>,
        quantity: u32,
    },
    VariantSelected { variant: Variant },
    QuantityChange { variant_id: u64, quantity: u32 },
    RemoveItem { line_index: usize },
    Toast(Toast),
}

impl AppEvent {
    /// Wire name of the event, as themes and listeners know it.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::VariantChanged { .. } => "product:variant:changed",
            Self::CartChanged { .. } => "product:cart:changed",
            Self::CartNotification { .. } => "product:cart:notification:changed",
            Self::FiltersChanged => "filters:changed",
            Self::VariantChange { .. } => "variant-change",
            Self::VariantSelected { .. } => "variant-changed",
            Self::QuantityChange { .. } => "quantity-change",
            Self::RemoveItem { .. } => "remove-item",
            Self::Toast(_) => "toast:show",
        }
    }
}

/// Cloneable handle to a broadcast channel of [`AppEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to every current subscriber. Having none is not an error.
    pub fn emit(&self, event: AppEvent) {
        tracing::trace!(event = event.name(), "emit");
        let _ = self.sender.send(event);
    }

    #[must_use]
    pub fn subscribe(&self) -> EventStream {
        EventStream {
            receiver: self.sender.subscribe(),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscriber's view of the bus.
#[derive(Debug)]
pub struct EventStream {
    receiver: broadcast::Receiver<AppEvent>,
}

impl EventStream {
    /// Waits for the next event. Returns `None` once every bus handle is gone.
    pub async fn recv(&mut self) -> Option<AppEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event subscriber lagged; events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next buffered event, without waiting.
    pub fn try_next(&mut self) -> Option<AppEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event subscriber lagged; events dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Every buffered event, oldest first.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
