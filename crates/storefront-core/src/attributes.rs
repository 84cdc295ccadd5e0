//! Defensive parsing of widget attributes.
//!
//! Widgets are configured from string attributes rendered by the theme
//! (`variants`, `options`, `data-slides`, `blocks`, ...). A malformed value
//! never fails the widget: it is logged and treated as empty.

use serde::de::DeserializeOwned;

/// Parses a JSON array attribute, degrading to an empty list.
///
/// `None`, blank strings, invalid JSON and JSON that is not an array of `T`
/// all produce an empty `Vec`.
#[must_use]
pub fn parse_json_list<T: DeserializeOwned>(raw: Option<&str>, attribute: &str) -> Vec<T> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<T>>(raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(attribute, error = %e, "invalid JSON in widget attribute");
            Vec::new()
        }
    }
}

/// Reads a boolean attribute; only the literal `"true"` is truthy.
#[must_use]
pub fn parse_flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| s.trim() == "true")
}

/// Reads a positive integer attribute, falling back to `default` when absent,
/// unparsable or zero.
#[must_use]
pub fn parse_positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Parses an integer the way a number input reports it: surrounding
/// whitespace is ignored, anything else non-numeric yields `None`.
#[must_use]
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_string_list() {
        let values: Vec<String> = parse_json_list(Some(r#"["Color","Size"]"#), "options");
        assert_eq!(values, vec!["Color", "Size"]);
    }

    #[test]
    fn missing_or_blank_attribute_is_empty() {
        let missing: Vec<String> = parse_json_list(None, "options");
        let blank: Vec<String> = parse_json_list(Some("  "), "options");
        assert!(missing.is_empty());
        assert!(blank.is_empty());
    }

    #[test]
    fn malformed_json_degrades_to_empty() {
        let values: Vec<String> = parse_json_list(Some("[\"Color\","), "options");
        assert!(values.is_empty());
    }

    #[test]
    fn non_array_json_degrades_to_empty() {
        let values: Vec<String> = parse_json_list(Some(r#"{"a":1}"#), "options");
        assert!(values.is_empty());
    }

    #[test]
    fn flag_only_accepts_true() {
        assert!(parse_flag(Some("true")));
        assert!(!parse_flag(Some("TRUE")));
        assert!(!parse_flag(Some("1")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn positive_or_falls_back() {
        assert_eq!(parse_positive_or(Some("3000"), 5000), 3000);
        assert_eq!(parse_positive_or(Some("fast"), 5000), 5000);
        assert_eq!(parse_positive_or(Some("0"), 5000), 5000);
        assert_eq!(parse_positive_or(None, 5000), 5000);
    }

    #[test]
    fn integer_parse_is_strict() {
        assert_eq!(parse_integer(" 3 "), Some(3));
        assert_eq!(parse_integer("-2"), Some(-2));
        assert_eq!(parse_integer("3abc"), None);
        assert_eq!(parse_integer(""), None);
    }
}
