pub mod app_config;
pub mod attributes;
pub mod cart;
pub mod config;
pub mod money;
pub mod product;
pub mod settings;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, LineItem, TaxLine};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_SETTINGS_PATH};
pub use money::format_money;
pub use product::{MediaRef, Product, Variant};
pub use settings::{load_settings, WidgetSettings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read settings file {path}: {source}")]
    SettingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file: {0}")]
    SettingsFileParse(#[source] serde_yaml::Error),

    #[error("settings validation failed: {0}")]
    Validation(String),
}
