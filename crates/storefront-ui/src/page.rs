//! Page URL helpers shared by widgets that track the selected variant.

use reqwest::Url;
use storefront_core::attributes::parse_integer;

const VARIANT_PARAM: &str = "variant";

/// Variant id from the page URL's `variant` parameter.
#[must_use]
pub fn variant_param(url: &Url) -> Option<u64> {
    url.query_pairs()
        .find(|(key, _)| key == VARIANT_PARAM)
        .and_then(|(_, value)| parse_integer(&value))
        .and_then(|id| u64::try_from(id).ok())
}

/// Replaces the `variant` parameter in place, keeping every other parameter
/// and its position.
pub fn set_variant_param(url: &mut Url, variant_id: u64) {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let value = variant_id.to_string();
    match pairs.iter().position(|(key, _)| key == VARIANT_PARAM) {
        Some(first) => {
            pairs[first].1 = value;
            let mut index = 0;
            pairs.retain(|(key, _)| {
                let keep = key != VARIANT_PARAM || index == first;
                index += 1;
                keep
            });
        }
        None => pairs.push((VARIANT_PARAM.to_string(), value)),
    }
    url.query_pairs_mut().clear().extend_pairs(&pairs);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn variant_param_parses_integer_ids() {
        assert_eq!(variant_param(&url("https://s.test/p?variant=42")), Some(42));
        assert_eq!(variant_param(&url("https://s.test/p?variant=abc")), None);
        assert_eq!(variant_param(&url("https://s.test/p?variant=-1")), None);
        assert_eq!(variant_param(&url("https://s.test/p")), None);
    }

    #[test]
    fn set_variant_param_replaces_in_place() {
        let mut u = url("https://s.test/products/shirt?ref=home&variant=1&utm=x&variant=9");
        set_variant_param(&mut u, 2);
        assert_eq!(
            u.as_str(),
            "https://s.test/products/shirt?ref=home&variant=2&utm=x"
        );
    }

    #[test]
    fn set_variant_param_appends_when_missing() {
        let mut u = url("https://s.test/products/shirt");
        set_variant_param(&mut u, 7);
        assert_eq!(u.as_str(), "https://s.test/products/shirt?variant=7");
    }
}
