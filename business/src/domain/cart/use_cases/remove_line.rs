use async_trait::async_trait;

use crate::domain::cart::outcome::MutationOutcome;
use crate::domain::shared::value_objects::LineId;

pub struct RemoveLineParams {
    pub line_id: LineId,
}

#[async_trait]
pub trait RemoveLineUseCase: Send + Sync {
    async fn execute(&self, params: RemoveLineParams) -> MutationOutcome;
}
