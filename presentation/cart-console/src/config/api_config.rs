use std::env;
use std::time::Duration;

use anyhow::Context;
use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the bookstore REST API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load API configuration from environment variables
    ///
    /// Environment variables:
    /// - CART_API_URL: Backend base URL (default: "http://127.0.0.1:8080/api")
    /// - CART_API_TOKEN: Bearer token of the storefront session (optional)
    /// - CART_REQUEST_TIMEOUT_SECS: Per-request timeout (default: 10)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_values(
            env::var("CART_API_URL").ok(),
            env::var("CART_API_TOKEN").ok(),
            env::var("CART_REQUEST_TIMEOUT_SECS").ok(),
        )
    }

    fn from_values(
        url: Option<String>,
        token: Option<String>,
        timeout_secs: Option<String>,
    ) -> anyhow::Result<Self> {
        let url = url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url =
            Url::parse(&url).with_context(|| format!("CART_API_URL is not a valid URL: {}", url))?;

        let timeout_secs = match timeout_secs {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("CART_REQUEST_TIMEOUT_SECS must be a number: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
