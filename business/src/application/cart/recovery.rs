use std::sync::Arc;

use crate::domain::cart::store::CartStore;
use crate::domain::cart::use_cases::refresh::RefreshCartUseCase;
use crate::domain::logger::Logger;

/// When to fall back to a full refresh after rollbacks pile up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPolicy {
    /// Consecutive remote failures that trigger a refresh; `0` disables it.
    pub refresh_after_failures: u32,
}

impl RecoveryPolicy {
    pub fn disabled() -> Self {
        Self {
            refresh_after_failures: 0,
        }
    }

    pub fn should_refresh(&self, consecutive_failures: u32) -> bool {
        self.refresh_after_failures > 0 && consecutive_failures >= self.refresh_after_failures
    }
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            refresh_after_failures: 3,
        }
    }
}

/// Re-syncs the snapshot with the backend once the failure threshold is hit.
pub struct CartRecovery {
    pub policy: RecoveryPolicy,
    pub store: Arc<CartStore>,
    pub refresh: Arc<dyn RefreshCartUseCase>,
    pub logger: Arc<dyn Logger>,
}

impl CartRecovery {
    /// Returns whether a refresh was attempted.
    pub async fn after_rollback(&self) -> bool {
        let failures = self.store.consecutive_failures();
        if !self.policy.should_refresh(failures) {
            return false;
        }

        self.logger.warn(&format!(
            "{} consecutive cart failures, refreshing from server",
            failures
        ));
        if let Err(error) = self.refresh.execute().await {
            self.logger
                .error(&format!("Recovery refresh failed: {}", error));
        }
        true
    }
}
