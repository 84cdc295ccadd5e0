//! Widget settings loaded from `config/widgets.yaml`.
//!
//! Every key is optional; a missing file section falls back to the same
//! defaults the theme ships with.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub quantity: QuantitySettings,
    pub toast: ToastSettings,
    pub notification: NotificationSettings,
    pub carousel: CarouselSettings,
    pub cart_footer: CartFooterSettings,
}

/// Quantity input policy applied when a variant is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantitySettings {
    /// Value the quantity input resets to when an available variant is picked.
    pub baseline: u32,
    /// Upper bound for the quantity input. `None` leaves it unbounded.
    pub max: Option<u32>,
}

impl Default for QuantitySettings {
    fn default() -> Self {
        Self {
            baseline: 1,
            max: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastSettings {
    pub duration_ms: u64,
    /// Used for purchase-gate warnings and network failures.
    pub error_duration_ms: u64,
}

impl Default for ToastSettings {
    fn default() -> Self {
        Self {
            duration_ms: 4000,
            error_duration_ms: 6000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub auto_hide_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { auto_hide_ms: 8000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub speed_ms: u64,
    pub swipe_threshold_px: u32,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            speed_ms: 5000,
            swipe_threshold_px: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartFooterSettings {
    pub blocks: Vec<String>,
}

impl Default for CartFooterSettings {
    fn default() -> Self {
        Self {
            blocks: vec![
                "subtotal".to_string(),
                "update_button".to_string(),
                "checkout_button".to_string(),
            ],
        }
    }
}

/// Load and validate widget settings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_settings(path: &Path) -> Result<WidgetSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_settings(&content)
}

/// Parse and validate widget settings from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text does not parse or fails validation.
pub fn parse_settings(content: &str) -> Result<WidgetSettings, ConfigError> {
    // An empty document deserializes to unit, not to an empty mapping.
    if content.trim().is_empty() {
        return Ok(WidgetSettings::default());
    }

    let settings: WidgetSettings =
        serde_yaml::from_str(content).map_err(ConfigError::SettingsFileParse)?;

    validate_settings(&settings)?;

    Ok(settings)
}

fn validate_settings(settings: &WidgetSettings) -> Result<(), ConfigError> {
    if let Some(max) = settings.quantity.max {
        if settings.quantity.baseline > max {
            return Err(ConfigError::Validation(format!(
                "quantity.baseline ({}) exceeds quantity.max ({max})",
                settings.quantity.baseline
            )));
        }
    }

    let durations = [
        ("toast.duration_ms", settings.toast.duration_ms),
        ("toast.error_duration_ms", settings.toast.error_duration_ms),
        (
            "notification.auto_hide_ms",
            settings.notification.auto_hide_ms,
        ),
        ("carousel.speed_ms", settings.carousel.speed_ms),
    ];
    for (key, value) in durations {
        if value == 0 {
            return Err(ConfigError::Validation(format!("{key} must be positive")));
        }
    }

    for block in &settings.cart_footer.blocks {
        if block.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cart_footer.blocks entries must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
