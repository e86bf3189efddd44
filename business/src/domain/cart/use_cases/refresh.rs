use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSnapshot;

#[async_trait]
pub trait RefreshCartUseCase: Send + Sync {
    async fn execute(&self) -> Result<CartSnapshot, CartError>;
}
