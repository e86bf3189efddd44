use async_trait::async_trait;

use crate::domain::errors::RemoteCartError;
use crate::domain::shared::value_objects::LineId;

use super::model::CartLine;

/// Port to the authoritative cart held by the backend.
#[async_trait]
pub trait RemoteCartService: Send + Sync {
    async fn fetch_cart(&self) -> Result<Vec<CartLine>, RemoteCartError>;
    async fn update_line_quantity(
        &self,
        line_id: LineId,
        quantity: u32,
    ) -> Result<CartLine, RemoteCartError>;
    async fn remove_line(&self, line_id: LineId) -> Result<(), RemoteCartError>;
    async fn clear_cart(&self) -> Result<(), RemoteCartError>;
}
