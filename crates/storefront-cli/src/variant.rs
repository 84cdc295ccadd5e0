//! `variant` command handlers. These run against a product JSON file and
//! never touch the network.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Subcommand;
use serde::Deserialize;
use storefront_core::{Product, Variant, WidgetSettings};
use storefront_ui::variant::{resolve, AvailabilityView, PurchaseGate, QuantityPolicy};

#[derive(Debug, Subcommand)]
pub enum VariantCommands {
    /// Resolve a selection and print what the selector would show
    Resolve {
        /// JSON file with `options` and `variants`, as the theme renders them
        #[arg(long)]
        product: PathBuf,
        /// Option values in option order; an empty value leaves that option
        /// unselected
        #[arg(long = "select", num_args = 1..)]
        select: Vec<String>,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
}

#[derive(Debug, Deserialize)]
struct ProductFile {
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    variants: Vec<Variant>,
}

pub(crate) fn run(command: VariantCommands, settings: &WidgetSettings) -> anyhow::Result<()> {
    match command {
        VariantCommands::Resolve {
            product,
            select,
            currency,
        } => {
            let raw = std::fs::read_to_string(&product)
                .with_context(|| format!("failed to read {}", product.display()))?;
            let file: ProductFile = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", product.display()))?;
            let product = Product::new(file.options, file.variants);
            let report = resolve_report(&product, &select, settings, &currency);
            print!("{report}");
            Ok(())
        }
    }
}

/// Text report of resolving `select` against `product`.
pub(crate) fn resolve_report(
    product: &Product,
    select: &[String],
    settings: &WidgetSettings,
    currency: &str,
) -> String {
    let selection: Vec<Option<String>> = (0..product.option_count())
        .map(|i| select.get(i).filter(|v| !v.is_empty()).cloned())
        .collect();
    let resolution = resolve(product.variants(), product.option_count(), &selection);
    let view = AvailabilityView::project(
        resolution.variant,
        &QuantityPolicy::from(&settings.quantity),
        currency,
    );

    let mut out = String::new();
    for (index, name) in product.options().iter().enumerate() {
        let chosen = resolution
            .selection
            .get(index)
            .and_then(Option::as_deref)
            .unwrap_or("-");
        let legal = resolution
            .legal_values
            .get(index)
            .map(|values| values.join(", "))
            .unwrap_or_default();
        out.push_str(&format!("{name}: {chosen} [{legal}]\n"));
    }
    match resolution.variant {
        Some(variant) => out.push_str(&format!("Variant: {} ({})\n", variant.id, variant.title)),
        None => out.push_str("Variant: none\n"),
    }
    out.push_str(&format!("Stock: {}\n", view.stock.as_str()));
    if let Some(price) = &view.price {
        out.push_str(&format!("Price: {price}\n"));
    }
    if let Some(compare) = &view.compare_at_price {
        out.push_str(&format!("Compare at: {compare}\n"));
    }
    out.push_str(&format!("Quantity: {}\n", view.quantity));
    match PurchaseGate::check(resolution.variant, &view.quantity.to_string()) {
        Ok(request) => out.push_str(&format!(
            "Purchasable: {} x {}\n",
            request.variant_id, request.quantity
        )),
        Err(rejection) => out.push_str(&format!("Purchasable: no ({rejection})\n")),
    }
    out
}
