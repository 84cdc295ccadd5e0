use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level configuration, read from `STOREFRONT_*` environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store root, e.g. `https://shop.example.com`. Any path is ignored by the client.
    pub store_url: String,
    pub env: Environment,
    pub log_level: String,
    /// ISO 4217 code used when formatting prices, e.g. `"USD"`.
    pub currency: String,
    pub user_agent: String,
    /// `None` means requests are never timed out.
    pub request_timeout_secs: Option<u64>,
    pub settings_path: PathBuf,
}
