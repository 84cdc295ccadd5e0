use std::path::Path;

use super::*;

#[test]
fn empty_document_yields_defaults() {
    let settings = parse_settings("").unwrap();
    assert_eq!(settings, WidgetSettings::default());
    assert_eq!(settings.quantity.baseline, 1);
    assert!(settings.quantity.max.is_none());
    assert_eq!(settings.toast.duration_ms, 4000);
    assert_eq!(settings.toast.error_duration_ms, 6000);
    assert_eq!(settings.notification.auto_hide_ms, 8000);
    assert_eq!(settings.carousel.speed_ms, 5000);
    assert_eq!(settings.carousel.swipe_threshold_px, 50);
    assert_eq!(
        settings.cart_footer.blocks,
        vec!["subtotal", "update_button", "checkout_button"]
    );
}

#[test]
fn partial_document_keeps_other_defaults() {
    let yaml = r"
quantity:
  baseline: 0
carousel:
  speed_ms: 3000
";
    let settings = parse_settings(yaml).unwrap();
    assert_eq!(settings.quantity.baseline, 0);
    assert_eq!(settings.carousel.speed_ms, 3000);
    assert_eq!(settings.carousel.swipe_threshold_px, 50);
    assert_eq!(settings.toast, ToastSettings::default());
}

#[test]
fn baseline_above_max_is_rejected() {
    let yaml = r"
quantity:
  baseline: 5
  max: 3
";
    let err = parse_settings(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("quantity.baseline")));
}

#[test]
fn zero_duration_is_rejected() {
    let yaml = r"
toast:
  duration_ms: 0
";
    let err = parse_settings(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("toast.duration_ms")));
}

#[test]
fn blank_footer_block_is_rejected() {
    let yaml = r#"
cart_footer:
  blocks: ["subtotal", "  "]
"#;
    assert!(matches!(
        parse_settings(yaml),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = parse_settings("quantity: [unterminated").unwrap_err();
    assert!(matches!(err, ConfigError::SettingsFileParse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_settings(Path::new("/nonexistent/widgets.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::SettingsFileIo { ref path, .. } if path.contains("widgets.yaml"))
    );
}
