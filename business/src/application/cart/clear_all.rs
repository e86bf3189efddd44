use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::recovery::CartRecovery;
use crate::domain::cart::confirmation::{ConfirmationGate, ConfirmationRequest};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::notifier::CartNotifier;
use crate::domain::cart::outcome::MutationOutcome;
use crate::domain::cart::remote::RemoteCartService;
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::clear_all::ClearCartUseCase;
use crate::domain::logger::Logger;

pub struct ClearCartUseCaseImpl {
    pub store: Arc<CartStore>,
    pub remote: Arc<dyn RemoteCartService>,
    pub confirmation: Arc<dyn ConfirmationGate>,
    pub notifier: Arc<dyn CartNotifier>,
    pub recovery: Arc<CartRecovery>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self) -> MutationOutcome {
        let line_count = self.store.snapshot().lines.len();
        if line_count == 0 {
            self.logger.debug("Cart already empty, nothing to clear");
            return MutationOutcome::Cleared;
        }

        let request = ConfirmationRequest::ClearCart { line_count };
        if !self.confirmation.confirm(&request).await {
            self.logger.info("Clearing cart cancelled by user");
            return MutationOutcome::Cancelled;
        }

        let ticket = self.store.begin_clear();
        self.logger.info(&format!(
            "Clearing cart ({} lines hidden)",
            ticket.snapshot.lines.len()
        ));

        let result = self.remote.clear_cart().await.map_err(CartError::from);

        let outcome = self.store.resolve_clear(ticket, result);
        match &outcome {
            MutationOutcome::RolledBack(error) => self
                .logger
                .warn(&format!("Clearing cart rolled back: {}", error)),
            _ => self.logger.info("Cart cleared"),
        }

        self.notifier.notify(&outcome);
        if matches!(outcome, MutationOutcome::RolledBack(_)) {
            self.recovery.after_rollback().await;
        }
        outcome
    }
}
