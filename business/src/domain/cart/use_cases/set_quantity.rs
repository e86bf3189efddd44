use async_trait::async_trait;

use crate::domain::cart::outcome::MutationOutcome;
use crate::domain::shared::value_objects::LineId;

pub struct SetQuantityParams {
    pub line_id: LineId,
    pub quantity: u32,
}

#[async_trait]
pub trait SetQuantityUseCase: Send + Sync {
    async fn execute(&self, params: SetQuantityParams) -> MutationOutcome;
}
