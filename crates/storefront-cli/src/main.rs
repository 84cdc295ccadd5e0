mod cart;
mod variant;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use storefront_core::WidgetSettings;
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;
use crate::variant::VariantCommands;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Drive storefront widgets against a live store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect and edit the session cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Offline variant resolution against a product JSON file
    Variant {
        #[command(subcommand)]
        command: VariantCommands,
    },
    /// Print a rendered section's HTML
    Section {
        /// Section id, e.g. `cart-notification`
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Variant resolution runs offline, so the store URL is only required for
    // the commands that talk to the store.
    match cli.command {
        Commands::Variant { command } => {
            init_tracing("info")?;
            let path = settings_path(|k| std::env::var(k));
            let settings = load_settings_or_default(&path)?;
            variant::run(command, &settings)
        }
        Commands::Cart { command } => {
            let config = storefront_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let settings = load_settings_or_default(&config.settings_path)?;
            cart::run(command, &config, settings).await
        }
        Commands::Section { id } => {
            let config = storefront_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let client = storefront_client::StorefrontClient::from_config(&config)?;
            println!("{}", client.fetch_section(&id).await?);
            Ok(())
        }
    }
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// `STOREFRONT_SETTINGS_PATH`, or the default location when unset or blank.
/// Read on its own so offline commands need no store URL.
fn settings_path<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("STOREFRONT_SETTINGS_PATH")
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .map_or_else(|| PathBuf::from(storefront_core::DEFAULT_SETTINGS_PATH), PathBuf::from)
}

/// Widget settings from `path`, or the built-in defaults when the file does
/// not exist. A file that exists but fails to parse is an error.
fn load_settings_or_default(path: &Path) -> anyhow::Result<WidgetSettings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no widget settings file; using defaults");
        return Ok(WidgetSettings::default());
    }
    Ok(storefront_core::load_settings(path)?)
}

#[cfg(test)]
mod tests;
