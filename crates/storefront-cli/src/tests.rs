use super::*;
use crate::cart::parse_line_edit;
use crate::variant::resolve_report;

#[test]
fn parses_cart_show_command() {
    let cli = Cli::try_parse_from(["storefront", "cart", "show"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Show
        }
    ));
}

#[test]
fn cart_add_quantity_defaults_to_one() {
    let cli = Cli::try_parse_from(["storefront", "cart", "add", "--variant", "42"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Add {
                variant: 42,
                quantity: 1
            }
        }
    ));
}

#[test]
fn cart_add_rejects_zero_quantity() {
    let result = Cli::try_parse_from([
        "storefront",
        "cart",
        "add",
        "--variant",
        "42",
        "--quantity",
        "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn cart_update_collects_repeated_edits() {
    let cli = Cli::try_parse_from([
        "storefront",
        "cart",
        "update",
        "--set",
        "1=3",
        "--set",
        "3=1",
    ])
    .unwrap();
    match cli.command {
        Commands::Cart {
            command: CartCommands::Update { edits },
        } => assert_eq!(edits, vec![(1, 3), (3, 1)]),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cart_update_requires_an_edit() {
    assert!(Cli::try_parse_from(["storefront", "cart", "update"]).is_err());
}

#[test]
fn line_edit_parsing() {
    assert_eq!(parse_line_edit("2=1"), Ok((2, 1)));
    assert_eq!(parse_line_edit(" 4 = 7 "), Ok((4, 7)));
    assert!(parse_line_edit("0=1").is_err());
    assert!(parse_line_edit("2").is_err());
    assert!(parse_line_edit("a=1").is_err());
    assert!(parse_line_edit("1=-1").is_err());
}

#[test]
fn line_edit_rejects_zero_quantity() {
    let err = parse_line_edit("2=0").unwrap_err();
    assert!(err.contains("cart remove --line 2"), "got: {err}");
    assert!(Cli::try_parse_from(["storefront", "cart", "update", "--set", "2=0"]).is_err());
}

#[test]
fn settings_path_prefers_env_var() {
    let path = settings_path(|key| {
        assert_eq!(key, "STOREFRONT_SETTINGS_PATH");
        Ok("/etc/storefront/widgets.yaml".to_string())
    });
    assert_eq!(path, std::path::PathBuf::from("/etc/storefront/widgets.yaml"));
}

#[test]
fn settings_path_falls_back_when_unset_or_blank() {
    let unset = settings_path(|_| Err(std::env::VarError::NotPresent));
    assert_eq!(unset, std::path::PathBuf::from("./config/widgets.yaml"));
    let blank = settings_path(|_| Ok("  ".to_string()));
    assert_eq!(blank, std::path::PathBuf::from("./config/widgets.yaml"));
}

#[test]
fn cart_remove_requires_positive_line() {
    let cli = Cli::try_parse_from(["storefront", "cart", "remove", "--line", "2"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Remove { line: 2 }
        }
    ));
    assert!(Cli::try_parse_from(["storefront", "cart", "remove", "--line", "0"]).is_err());
}

#[test]
fn parses_section_command() {
    let cli = Cli::try_parse_from(["storefront", "section", "cart-notification"]).unwrap();
    assert!(matches!(cli.command, Commands::Section { ref id } if id == "cart-notification"));
}

#[test]
fn parses_variant_resolve_selection() {
    let cli = Cli::try_parse_from([
        "storefront",
        "variant",
        "resolve",
        "--product",
        "shirt.json",
        "--select",
        "Blue",
        "Large",
    ])
    .unwrap();
    match cli.command {
        Commands::Variant {
            command:
                VariantCommands::Resolve {
                    product,
                    select,
                    currency,
                },
        } => {
            assert_eq!(product, std::path::PathBuf::from("shirt.json"));
            assert_eq!(select, vec!["Blue", "Large"]);
            assert_eq!(currency, "USD");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["storefront"]).is_err());
}

fn shirt() -> storefront_core::Product {
    storefront_core::Product::from_attributes(
        Some(r#"["Color", "Size"]"#),
        Some(
            r#"[
                {"id": 1, "title": "Red / Small", "options": ["Red", "Small"], "price": 1000, "compare_at_price": 1500},
                {"id": 2, "title": "Blue / Large", "options": ["Blue", "Large"], "price": 1200, "compare_at_price": 1500, "available": false}
            ]"#,
        ),
    )
}

#[test]
fn resolve_report_for_available_variant() {
    let report = resolve_report(
        &shirt(),
        &["Red".to_string(), "Small".to_string()],
        &WidgetSettings::default(),
        "USD",
    );
    assert!(report.contains("Color: Red [Red, Blue]"));
    assert!(report.contains("Variant: 1 (Red / Small)"));
    assert!(report.contains("Stock: In stock"));
    assert!(report.contains("Price: $10.00"));
    assert!(report.contains("Compare at: $15.00"));
    assert!(report.contains("Purchasable: 1 x 1"));
}

#[test]
fn resolve_report_clears_unreachable_pick() {
    let report = resolve_report(
        &shirt(),
        &["Blue".to_string(), "Small".to_string()],
        &WidgetSettings::default(),
        "USD",
    );
    assert!(report.contains("Size: - [Large]"));
    assert!(report.contains("Variant: none"));
    assert!(report.contains("Stock: Variant not available"));
    assert!(report.contains("Purchasable: no (Please select an available variant.)"));
}
