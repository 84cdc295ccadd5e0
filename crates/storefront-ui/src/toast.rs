//! Toast notifications: transient, typed messages that dismiss themselves.

use std::time::Duration;

use storefront_core::settings::ToastSettings;
use tokio::time::Instant;

use crate::events::AppEvent;
use crate::html::escape_html;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Success,
    Danger,
    Warning,
    Info,
}

/// Background, border and text colours of one toast kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

impl ToastKind {
    /// Unknown names fall back to `Success`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "danger" => Self::Danger,
            "warning" => Self::Warning,
            "info" => Self::Info,
            _ => Self::Success,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    #[must_use]
    pub fn palette(self) -> Palette {
        match self {
            Self::Success => Palette {
                background: "#D1FAE5",
                border: "#10B981",
                text: "#065F46",
            },
            Self::Danger => Palette {
                background: "#FEE2E2",
                border: "#EF4444",
                text: "#991B1B",
            },
            Self::Warning => Palette {
                background: "#FEF3C7",
                border: "#F59E0B",
                text: "#92400E",
            },
            Self::Info => Palette {
                background: "#DBEAFE",
                border: "#3B82F6",
                text: "#1E40AF",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    #[must_use]
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: DEFAULT_DURATION,
        }
    }

    /// Danger toast shown for failed actions, with the configured error
    /// duration.
    #[must_use]
    pub fn error(message: impl Into<String>, settings: &ToastSettings) -> Self {
        Self::new(ToastKind::Danger, message)
            .with_duration(Duration::from_millis(settings.error_duration_ms))
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveToast {
    pub id: u64,
    pub toast: Toast,
    pub expires_at: Instant,
}

/// The toast container: every visible toast, oldest first.
#[derive(Debug, Default)]
pub struct ToastStack {
    entries: Vec<ActiveToast>,
    next_id: u64,
}

impl ToastStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `toast` until `now + toast.duration`. Returns its id.
    pub fn push(&mut self, toast: Toast, now: Instant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!(id, kind = toast.kind.as_str(), "showing toast");
        self.entries.push(ActiveToast {
            id,
            expires_at: now + toast.duration,
            toast,
        });
        id
    }

    /// Shows the toast carried by a `toast:show` event; ignores every other
    /// event.
    pub fn handle(&mut self, event: &AppEvent, now: Instant) -> Option<u64> {
        match event {
            AppEvent::Toast(toast) => Some(self.push(toast.clone(), now)),
            _ => None,
        }
    }

    /// Close action. Returns `false` when `id` is already gone.
    pub fn close(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Drops every toast whose deadline has passed. Returns how many went.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.expires_at > now);
        before - self.entries.len()
    }

    /// Sleeps until the earliest deadline, then expires. Returns immediately
    /// with `0` when nothing is showing.
    pub async fn expire_next(&mut self) -> usize {
        let Some(deadline) = self.next_deadline() else {
            return 0;
        };
        tokio::time::sleep_until(deadline).await;
        self.expire(Instant::now())
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.expires_at).min()
    }

    #[must_use]
    pub fn active(&self) -> &[ActiveToast] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn render_html(&self) -> String {
        self.entries.iter().map(render_toast).collect()
    }
}

fn render_toast(entry: &ActiveToast) -> String {
    let palette = entry.toast.kind.palette();
    format!(
        concat!(
            "<div class=\"toast toast--{kind}\" data-toast-id=\"{id}\" role=\"alert\" ",
            "aria-live=\"assertive\" aria-atomic=\"true\" ",
            "style=\"background-color:{bg};border-color:{border};color:{text}\">",
            "<div class=\"message\">{message}</div>",
            "<span class=\"close\" aria-label=\"Close toast\">&times;</span>",
            "</div>"
        ),
        kind = entry.toast.kind.as_str(),
        id = entry.id,
        bg = palette.background,
        border = palette.border,
        text = palette.text,
        message = escape_html(&entry.toast.message),
    )
}
