//! HTTP client for the storefront AJAX cart API.

mod origin;
mod sections;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use storefront_core::{AppConfig, Cart};

use crate::error::ClientError;
use crate::types::{AddItemRequest, CartUpdate, ChangeLineRequest, PlatformErrorBody};

pub use origin::store_origin;

const CART_PATH: &str = "/cart.js";
const CART_ADD_PATH: &str = "/cart/add.js";
const CART_CHANGE_PATH: &str = "/cart/change.js";
const CART_UPDATE_PATH: &str = "/cart/update.js";
const CHECKOUT_PATH: &str = "/cart/checkout";

/// Client for a single store's cart and section-rendering endpoints.
///
/// Every call is a single attempt: there is no retry and, unless configured,
/// no timeout. Non-2xx responses map to typed [`ClientError`] variants. A
/// cookie store keeps the platform's cart session across calls, so one
/// client instance sees one cart.
#[derive(Clone)]
pub struct StorefrontClient {
    client: Client,
    origin: Url,
}

impl StorefrontClient {
    /// Creates a client rooted at the origin of `store_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidStoreUrl`] if `store_url` is not an
    /// absolute http(s) URL, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        store_url: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ClientError> {
        let origin = store_origin(store_url)?;
        let mut builder = Client::builder().user_agent(user_agent).cookie_store(true);
        if let Some(secs) = timeout_secs {
            builder = builder
                .timeout(Duration::from_secs(secs))
                .connect_timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            origin,
        })
    }

    /// Creates a client from the store URL, user agent and timeout in `config`.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.store_url,
            &config.user_agent,
            config.request_timeout_secs,
        )
    }

    /// Store origin every endpoint is resolved against.
    #[must_use]
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Fetches the current cart (`GET /cart.js`).
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] other than `InvalidStoreUrl`.
    pub async fn fetch_cart(&self) -> Result<Cart, ClientError> {
        let url = self.endpoint(CART_PATH)?;
        tracing::debug!(%url, "fetching cart");
        self.send_json(self.client.get(url.clone()), &url, "cart")
            .await
    }

    /// Adds `quantity` of `variant_id` (`POST /cart/add.js`).
    ///
    /// The response body only confirms the add; callers re-fetch the cart to
    /// observe the resulting totals.
    ///
    /// # Errors
    ///
    /// [`ClientError::Rejected`] when the platform refuses the add (sold out,
    /// insufficient stock), otherwise any transport or status error.
    pub async fn add_item(&self, variant_id: u64, quantity: u32) -> Result<(), ClientError> {
        let url = self.endpoint(CART_ADD_PATH)?;
        tracing::debug!(%url, variant_id, quantity, "adding item to cart");
        let request = self.client.post(url.clone()).json(&AddItemRequest {
            id: variant_id,
            quantity,
        });
        let _: serde_json::Value = self.send_json(request, &url, "cart add").await?;
        Ok(())
    }

    /// Sets the quantity of the 1-based `line` (`POST /cart/change.js`).
    /// A quantity of `0` removes the line.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] other than `InvalidStoreUrl`.
    pub async fn change_line(&self, line: usize, quantity: u32) -> Result<Cart, ClientError> {
        let url = self.endpoint(CART_CHANGE_PATH)?;
        tracing::debug!(%url, line, quantity, "changing cart line");
        let request = self
            .client
            .post(url.clone())
            .json(&ChangeLineRequest { line, quantity });
        self.send_json(request, &url, "cart change").await
    }

    /// Updates cart-level note and attributes (`POST /cart/update.js`).
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] other than `InvalidStoreUrl`.
    pub async fn update_cart(&self, update: &CartUpdate) -> Result<Cart, ClientError> {
        let url = self.endpoint(CART_UPDATE_PATH)?;
        tracing::debug!(%url, "updating cart attributes");
        let request = self.client.post(url.clone()).json(update);
        self.send_json(request, &url, "cart update").await
    }

    /// Checkout permalink for buying `quantity` of `variant_id` directly:
    /// `/cart/checkout?items=[{"id":..,"quantity":..}]`.
    #[must_use]
    pub fn checkout_url(&self, variant_id: u64, quantity: u32) -> Url {
        let items = serde_json::json!([{ "id": variant_id, "quantity": quantity }]);
        let mut url = self.origin.clone();
        url.set_path(CHECKOUT_PATH);
        url.query_pairs_mut()
            .append_pair("items", &items.to_string());
        url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.origin
            .join(path)
            .map_err(|e| ClientError::InvalidStoreUrl {
                store_url: self.origin.to_string(),
                reason: format!("cannot resolve \"{path}\": {e}"),
            })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = check_status(response, url).await?;
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| ClientError::Deserialize {
            context: format!("{context} from {url}"),
            source: e,
        })
    }
}

/// Maps non-2xx responses to typed errors.
async fn check_status(response: Response, url: &Url) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ClientError::RateLimited {
            domain: origin::domain_of(url),
            retry_after_secs,
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound {
            url: url.to_string(),
        });
    }

    if status == StatusCode::UNPROCESSABLE_ENTITY || status == StatusCode::BAD_REQUEST {
        let body = response.text().await.unwrap_or_default();
        let description = serde_json::from_str::<PlatformErrorBody>(&body)
            .ok()
            .and_then(|b| b.description.or(b.message))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("rejected").to_owned());
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            description,
        });
    }

    Err(ClientError::UnexpectedStatus {
        status: status.as_u16(),
        url: url.to_string(),
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
