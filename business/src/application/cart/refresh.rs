use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSnapshot;
use crate::domain::cart::remote::RemoteCartService;
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::refresh::RefreshCartUseCase;
use crate::domain::logger::Logger;

pub struct RefreshCartUseCaseImpl {
    pub store: Arc<CartStore>,
    pub remote: Arc<dyn RemoteCartService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RefreshCartUseCase for RefreshCartUseCaseImpl {
    async fn execute(&self) -> Result<CartSnapshot, CartError> {
        self.logger.info("Fetching cart");

        let ticket = self.store.begin_refresh();
        let lines = self.remote.fetch_cart().await.map_err(|e| {
            self.logger.error(&format!("Cart fetch failed: {}", e));
            CartError::from(e)
        })?;

        let count = self.store.resolve_refresh(ticket, lines, Utc::now());

        self.logger
            .info(&format!("Cart refreshed with {} lines", count));
        Ok(self.store.snapshot())
    }
}
