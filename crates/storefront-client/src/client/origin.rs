//! Store origin helpers for the storefront client.

use reqwest::Url;

use crate::error::ClientError;

/// Reduces a store URL to its scheme+host origin.
///
/// Given `"https://shop.example.com/collections/all"`, returns
/// `https://shop.example.com/`. Cart endpoints always live at the store root,
/// whatever page the configured URL points at.
///
/// # Errors
///
/// Returns [`ClientError::InvalidStoreUrl`] if `store_url` is not an absolute
/// http(s) URL.
pub fn store_origin(store_url: &str) -> Result<Url, ClientError> {
    let parsed = Url::parse(store_url).map_err(|e| ClientError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidStoreUrl {
            store_url: store_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
        });
    }

    let origin = parsed.origin().ascii_serialization();
    Url::parse(&origin).map_err(|e| ClientError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason: format!("origin \"{origin}\" is not a valid URL base: {e}"),
    })
}

/// Hostname of `url`, for error messages.
pub(super) fn domain_of(url: &Url) -> String {
    url.host_str().map_or_else(|| url.to_string(), str::to_owned)
}
