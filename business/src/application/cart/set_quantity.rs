use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cart::recovery::CartRecovery;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::notifier::CartNotifier;
use crate::domain::cart::outcome::MutationOutcome;
use crate::domain::cart::remote::RemoteCartService;
use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::set_quantity::{SetQuantityParams, SetQuantityUseCase};
use crate::domain::logger::Logger;

pub struct SetQuantityUseCaseImpl {
    pub store: Arc<CartStore>,
    pub remote: Arc<dyn RemoteCartService>,
    pub notifier: Arc<dyn CartNotifier>,
    pub recovery: Arc<CartRecovery>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SetQuantityUseCase for SetQuantityUseCaseImpl {
    async fn execute(&self, params: SetQuantityParams) -> MutationOutcome {
        // Everything up to the remote call runs without yielding.
        let pending = match self
            .store
            .begin_set_quantity(params.line_id, params.quantity)
        {
            Ok(pending) => pending,
            Err(error) => {
                self.logger.warn(&format!(
                    "Quantity {} for line {} rejected locally: {}",
                    params.quantity, params.line_id, error
                ));
                let outcome = MutationOutcome::Rejected(error);
                if outcome.is_reportable() {
                    self.notifier.notify(&outcome);
                }
                return outcome;
            }
        };
        self.logger.debug(&format!(
            "Line {} shown at quantity {} (seq {})",
            params.line_id, params.quantity, pending.seq
        ));

        let result = self
            .remote
            .update_line_quantity(params.line_id, params.quantity)
            .await
            .map_err(CartError::from);

        let outcome = self.store.resolve_set_quantity(&pending, result);
        match &outcome {
            MutationOutcome::Updated(line) => self.logger.info(&format!(
                "Line {} confirmed at quantity {}",
                line.id, line.quantity
            )),
            MutationOutcome::RolledBack(error) => self.logger.warn(&format!(
                "Line {} rolled back to quantity {}: {}",
                params.line_id, pending.prior.quantity, error
            )),
            _ => self.logger.debug(&format!(
                "Stale response for line {} (seq {}) ignored",
                params.line_id, pending.seq
            )),
        }

        if outcome.is_reportable() {
            self.notifier.notify(&outcome);
        }
        if matches!(outcome, MutationOutcome::RolledBack(_)) {
            self.recovery.after_rollback().await;
        }
        outcome
    }
}
