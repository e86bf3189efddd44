use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use business::domain::cart::model::CartLine;
use business::domain::cart::remote::RemoteCartService;
use business::domain::errors::RemoteCartError;
use business::domain::shared::value_objects::LineId;

use crate::client::StorefrontClient;
use crate::dto::{CartDto, CartLineDto, ErrorBodyDto, LineEnvelopeDto, UpdateQuantityRequest};

/// Remote cart backed by the bookstore REST API.
pub struct RemoteCartServiceHttp {
    client: StorefrontClient,
}

impl RemoteCartServiceHttp {
    pub fn new(client: StorefrontClient) -> Self {
        Self { client }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, RemoteCartError> {
        let response = self
            .client
            .authorize(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(%status, "cart request rejected");
        Err(rejection_from(status, &body))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteCartError> {
    response
        .json::<T>()
        .await
        .map_err(|e| RemoteCartError::network(format!("invalid response body: {}", e)))
}

fn invalid_url(error: url::ParseError) -> RemoteCartError {
    RemoteCartError::network(format!("invalid endpoint: {}", error))
}

fn transport_error(error: reqwest::Error) -> RemoteCartError {
    if error.is_timeout() {
        RemoteCartError::network("request timed out")
    } else {
        RemoteCartError::network(error.to_string())
    }
}

/// Gateway failures never reached the cart logic, so they count as network errors.
fn rejection_from(status: StatusCode, body: &str) -> RemoteCartError {
    let message = serde_json::from_str::<ErrorBodyDto>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request rejected")
                .to_string()
        });

    match status {
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            RemoteCartError::Network(message)
        }
        _ => RemoteCartError::Rejected(message),
    }
}

#[async_trait]
impl RemoteCartService for RemoteCartServiceHttp {
    async fn fetch_cart(&self) -> Result<Vec<CartLine>, RemoteCartError> {
        let url = self.client.cart_url().map_err(invalid_url)?;
        let response = self.send(self.client.client.get(url)).await?;
        let cart: CartDto = read_json(response).await?;

        Ok(cart
            .lines
            .into_iter()
            .map(CartLineDto::into_domain)
            .collect())
    }

    async fn update_line_quantity(
        &self,
        line_id: LineId,
        quantity: u32,
    ) -> Result<CartLine, RemoteCartError> {
        let url = self.client.cart_item_url(line_id).map_err(invalid_url)?;
        let request = self
            .client
            .client
            .put(url)
            .json(&UpdateQuantityRequest { quantity });
        let response = self.send(request).await?;
        let envelope: LineEnvelopeDto = read_json(response).await?;

        Ok(envelope.line.into_domain())
    }

    async fn remove_line(&self, line_id: LineId) -> Result<(), RemoteCartError> {
        let url = self.client.cart_item_url(line_id).map_err(invalid_url)?;
        self.send(self.client.client.delete(url)).await?;
        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), RemoteCartError> {
        let url = self.client.cart_url().map_err(invalid_url)?;
        self.send(self.client.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    #[test]
    fn should_use_server_message_for_business_rejection() {
        let error = rejection_from(
            StatusCode::CONFLICT,
            r#"{"message": "Only 2 copies of Dune left"}"#,
        );

        assert_eq!(error, RemoteCartError::rejected("Only 2 copies of Dune left"));
    }

    #[test]
    fn should_fall_back_to_status_reason_when_body_unreadable() {
        let error = rejection_from(StatusCode::NOT_FOUND, "<html>oops</html>");

        assert_eq!(error, RemoteCartError::rejected("Not Found"));
    }

    #[test]
    fn should_fall_back_to_status_reason_when_message_blank() {
        let error = rejection_from(StatusCode::BAD_REQUEST, r#"{"message": " "}"#);

        assert_eq!(error, RemoteCartError::rejected("Bad Request"));
    }

    #[test]
    fn should_treat_gateway_errors_as_network_failures() {
        let error = rejection_from(StatusCode::SERVICE_UNAVAILABLE, "");

        assert!(matches!(error, RemoteCartError::Network(_)));
    }

    #[tokio::test]
    async fn should_report_unreachable_backend_as_network_failure() {
        // The `.invalid` TLD is reserved and never resolves.
        let client = StorefrontClient::new(
            Url::parse("http://cart-backend.invalid/api").unwrap(),
            None,
            Duration::from_secs(2),
        )
        .unwrap();
        let service = RemoteCartServiceHttp::new(client);

        let result = service.clear_cart().await;

        assert!(matches!(result, Err(RemoteCartError::Network(_))));
    }
}
