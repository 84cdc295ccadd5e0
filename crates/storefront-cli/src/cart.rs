//! `cart` command handlers.
//!
//! Each command mounts the cart widgets on a fresh session, performs one
//! action and prints the reconciled cart. Toasts the widgets publish along
//! the way go to stderr.

use anyhow::Context as _;
use clap::Subcommand;
use storefront_client::StorefrontClient;
use storefront_core::{AppConfig, WidgetSettings};
use storefront_ui::cart::NotificationContent;
use storefront_ui::variant::PurchaseRequest;
use storefront_ui::{AppEvent, CartWidget, EventBus, EventStream, WidgetContext};

#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Print the cart's lines and totals
    Show,
    /// Add a variant to the cart
    Add {
        /// Variant id
        #[arg(long)]
        variant: u64,
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Change line quantities in one batch
    Update {
        /// `LINE=QTY` with a 1-based line number and a quantity of at least
        /// 1; repeatable
        #[arg(long = "set", value_parser = parse_line_edit, required = true)]
        edits: Vec<(usize, u32)>,
    },
    /// Remove a line
    Remove {
        /// 1-based line number
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        line: u64,
    },
    /// Replace the cart note
    Note { text: String },
}

/// Parses `LINE=QTY` into a 1-based line and a positive quantity.
pub(crate) fn parse_line_edit(raw: &str) -> Result<(usize, u32), String> {
    let (line, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LINE=QTY, got \"{raw}\""))?;
    let line: usize = line
        .trim()
        .parse()
        .map_err(|_| format!("invalid line number \"{line}\""))?;
    if line == 0 {
        return Err("line numbers start at 1".to_string());
    }
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity \"{quantity}\""))?;
    if quantity == 0 {
        return Err(format!("quantity must be at least 1; use `cart remove --line {line}`"));
    }
    Ok((line, quantity))
}

pub(crate) async fn run(
    command: CartCommands,
    config: &AppConfig,
    settings: WidgetSettings,
) -> anyhow::Result<()> {
    let client = StorefrontClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build storefront client: {e}"))?;
    let ctx = WidgetContext::new(client, EventBus::new(), settings, config.currency.clone());
    let mut events = ctx.bus.subscribe();

    let result = execute(command, ctx).await;
    report_toasts(&mut events);
    result
}

async fn execute(command: CartCommands, ctx: WidgetContext) -> anyhow::Result<()> {
    match command {
        CartCommands::Show => {
            let widget = CartWidget::connect(ctx).await;
            print_cart(&widget)
        }
        CartCommands::Add { variant, quantity } => {
            let request = PurchaseRequest {
                variant_id: variant,
                quantity,
            };
            let cart = storefront_ui::cart::add_item(&ctx, request).await?;
            match cart.find_variant(variant) {
                Some(line) => {
                    let added = NotificationContent::from_line(line, quantity, &cart.currency);
                    println!(
                        "Added to cart: {} / {} {}",
                        added.name, added.variant_title, added.added
                    );
                    println!(
                        "  {} each, {} in cart, line total {}",
                        added.unit_price, added.cart_quantity, added.line_total
                    );
                }
                None => println!("Added variant {variant}; it is not in the refreshed cart"),
            }
            println!("Cart now holds {} item(s)", cart.item_count);
            Ok(())
        }
        CartCommands::Update { edits } => {
            let mut widget = CartWidget::connect(ctx).await;
            for (line, quantity) in &edits {
                widget.stage_quantity(line - 1, &quantity.to_string());
            }
            let outcome = widget.submit_updates().await?;
            println!("Applied {}/{} line edit(s)", outcome.applied, outcome.staged);
            print_cart(&widget)
        }
        CartCommands::Remove { line } => {
            let index = usize::try_from(line - 1).context("line number out of range")?;
            let mut widget = CartWidget::connect(ctx).await;
            widget.remove_item(index).await?;
            print_cart(&widget)
        }
        CartCommands::Note { text } => {
            let mut widget = CartWidget::connect(ctx).await;
            let cart = widget.update_note(&text).await?;
            println!("Note: {}", cart.note.as_deref().unwrap_or_default());
            Ok(())
        }
    }
}

fn print_cart(widget: &CartWidget) -> anyhow::Result<()> {
    let totals = widget
        .totals()
        .context("cart could not be loaded from the store")?;
    if totals.is_empty {
        println!("Your cart is empty");
        return Ok(());
    }
    for item in widget.items() {
        println!(
            "{:>3}. {} ({}) x{}  {} each  {}",
            item.line_index + 1,
            item.product_title,
            item.variant_title,
            item.quantity,
            item.unit_price,
            item.line_price
        );
    }
    println!("{}", totals.subtotal);
    println!("{}", totals.tax);
    if !totals.total.is_empty() {
        println!("{}", totals.total);
    }
    Ok(())
}

fn report_toasts(events: &mut EventStream) {
    for event in events.drain() {
        if let AppEvent::Toast(toast) = event {
            eprintln!("[{}] {}", toast.kind.as_str(), toast.message);
        }
    }
}
