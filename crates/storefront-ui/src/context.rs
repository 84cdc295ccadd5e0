//! Shared handles every widget is constructed with.

use std::time::Duration;

use storefront_client::StorefrontClient;
use storefront_core::WidgetSettings;

use crate::events::{AppEvent, EventBus};
use crate::toast::{Toast, ToastKind};

/// Client, event bus and settings for one page. Cheap to clone; clones share
/// the same bus and cookie session.
#[derive(Clone)]
pub struct WidgetContext {
    pub client: StorefrontClient,
    pub bus: EventBus,
    pub settings: WidgetSettings,
    /// ISO 4217 code used for every formatted price.
    pub currency: String,
}

impl WidgetContext {
    #[must_use]
    pub fn new(
        client: StorefrontClient,
        bus: EventBus,
        settings: WidgetSettings,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            client,
            bus,
            settings,
            currency: currency.into(),
        }
    }

    /// Publishes a toast for the toast container.
    pub fn toast(&self, toast: Toast) {
        self.bus.emit(AppEvent::Toast(toast));
    }

    /// Publishes a toast with the configured default duration.
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let duration = Duration::from_millis(self.settings.toast.duration_ms);
        self.toast(Toast::new(kind, message).with_duration(duration));
    }

    /// Publishes a danger toast with the configured error duration.
    pub fn toast_error(&self, message: impl Into<String>) {
        self.toast(Toast::error(message, &self.settings.toast));
    }
}
