use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::recovery::CartRecovery;
use crate::domain::cart::confirmation::{ConfirmationGate, ConfirmationRequest};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::notifier::CartNotifier;
use crate::domain::cart::outcome::MutationOutcome;
use crate::domain::cart::remote::RemoteCartService;
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::remove_line::{RemoveLineParams, RemoveLineUseCase};
use crate::domain::logger::Logger;

pub struct RemoveLineUseCaseImpl {
    pub store: Arc<CartStore>,
    pub remote: Arc<dyn RemoteCartService>,
    pub confirmation: Arc<dyn ConfirmationGate>,
    pub notifier: Arc<dyn CartNotifier>,
    pub recovery: Arc<CartRecovery>,
    pub logger: Arc<dyn Logger>,
}

impl RemoveLineUseCaseImpl {
    fn reject(&self, error: CartError) -> MutationOutcome {
        self.logger
            .warn(&format!("Removal rejected locally: {}", error));
        let outcome = MutationOutcome::Rejected(error);
        self.notifier.notify(&outcome);
        outcome
    }
}

#[async_trait]
impl RemoveLineUseCase for RemoveLineUseCaseImpl {
    async fn execute(&self, params: RemoveLineParams) -> MutationOutcome {
        let line_id = params.line_id;
        let Some(line) = self.store.line(line_id) else {
            return self.reject(CartError::LineNotFound(line_id));
        };

        let request = ConfirmationRequest::RemoveLine {
            line_id,
            product_name: line.product_name,
        };
        if !self.confirmation.confirm(&request).await {
            self.logger
                .info(&format!("Removal of line {} cancelled by user", line_id));
            return MutationOutcome::Cancelled;
        }

        // The line may have gone away while the prompt was open.
        let ticket = match self.store.begin_remove(line_id) {
            Ok(ticket) => ticket,
            Err(error) => return self.reject(error),
        };
        self.logger.debug(&format!(
            "Line {} hidden from position {}",
            line_id, ticket.index
        ));

        let result = self
            .remote
            .remove_line(line_id)
            .await
            .map_err(CartError::from);

        let outcome = self.store.resolve_remove(ticket, result);
        match &outcome {
            MutationOutcome::RolledBack(error) => self
                .logger
                .warn(&format!("Removal of line {} rolled back: {}", line_id, error)),
            _ => self.logger.info(&format!("Line {} removed", line_id)),
        }

        self.notifier.notify(&outcome);
        if matches!(outcome, MutationOutcome::RolledBack(_)) {
            self.recovery.after_rollback().await;
        }
        outcome
    }
}
