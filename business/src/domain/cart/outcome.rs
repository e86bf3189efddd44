use crate::domain::shared::value_objects::LineId;

use super::errors::CartError;
use super::model::CartLine;

/// How one coordinator operation resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server confirmed the quantity change; carries the authoritative line.
    Updated(CartLine),
    Removed(LineId),
    Cleared,
    /// A local precondition failed before any network call.
    Rejected(CartError),
    /// The remote call failed and the optimistic change was reverted.
    RolledBack(CartError),
    /// A newer intent for the same line owns the visible state.
    Superseded,
    /// The user declined the confirmation prompt.
    Cancelled,
}

impl MutationOutcome {
    pub fn error(&self) -> Option<&CartError> {
        match self {
            MutationOutcome::Rejected(error) | MutationOutcome::RolledBack(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            MutationOutcome::Updated(_)
                | MutationOutcome::Removed(_)
                | MutationOutcome::Cleared
        )
    }

    /// Whether the presentation layer should hear about this outcome.
    pub fn is_reportable(&self) -> bool {
        match self {
            MutationOutcome::Superseded | MutationOutcome::Cancelled => false,
            MutationOutcome::Rejected(CartError::OutOfStockConfirmationRequired(_)) => false,
            _ => true,
        }
    }
}
