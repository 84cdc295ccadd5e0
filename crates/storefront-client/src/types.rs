//! Request and response bodies for the storefront AJAX cart API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body for `POST /cart/add.js`.
#[derive(Debug, Serialize)]
pub(crate) struct AddItemRequest {
    pub id: u64,
    pub quantity: u32,
}

/// Body for `POST /cart/change.js`. `line` is 1-based.
#[derive(Debug, Serialize)]
pub(crate) struct ChangeLineRequest {
    pub line: usize,
    pub quantity: u32,
}

/// Body for `POST /cart/update.js`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl CartUpdate {
    #[must_use]
    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(key.into(), serde_json::Value::String(value.into()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.note.is_none() && self.attributes.is_empty()
    }
}

/// Response of `?sections=a,b`: rendered HTML per section id. A section the
/// store does not define comes back as `null`.
pub type SectionMap = HashMap<String, Option<String>>;

/// Error body the platform sends with 4xx responses from cart endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct PlatformErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
