use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use url::Url;
use uuid::Uuid;

use business::domain::shared::value_objects::LineId;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("storefront.invalid_base_url")]
    InvalidBaseUrl,
    #[error("storefront.client_build")]
    Build,
}

/// Shared HTTP client configuration for the bookstore REST API.
pub struct StorefrontClient {
    pub client: Client,
    pub base_url: Url,
    pub token: Option<String>,
}

impl StorefrontClient {
    pub fn new(
        base_url: Url,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|_| ClientError::Build)?;

        // `Url::join` replaces the last segment unless the base ends with '/'.
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Returns the cart endpoint URL.
    pub fn cart_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join("cart")
    }

    /// Returns the endpoint URL of a single cart line.
    pub fn cart_item_url(&self, line_id: LineId) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!("cart/items/{}", line_id))
    }

    /// Adds the request id and, when configured, the bearer token.
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("X-Request-Id", Uuid::new_v4().to_string());
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
