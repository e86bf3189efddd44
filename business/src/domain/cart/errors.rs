use crate::domain::errors::RemoteCartError;

use crate::domain::shared::value_objects::LineId;

/// The four outcome kinds a failed cart mutation can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A local precondition failed; no network call was made.
    ValidationRejected,
    /// Not a true error: the caller must decide whether to remove the line instead.
    OutOfStockConfirmationRequired,
    RemoteRejected,
    NetworkFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("cart.quantity_below_minimum")]
    QuantityBelowMinimum,
    #[error("cart.stock_exceeded")]
    StockExceeded { remaining: u32 },
    #[error("cart.line_not_found")]
    LineNotFound(LineId),
    #[error("cart.out_of_stock_confirmation_required")]
    OutOfStockConfirmationRequired(LineId),
    #[error("cart.remote_rejected")]
    RemoteRejected(String),
    #[error("cart.network_failure")]
    NetworkFailure(String),
}

impl CartError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CartError::QuantityBelowMinimum
            | CartError::StockExceeded { .. }
            | CartError::LineNotFound(_) => FailureKind::ValidationRejected,
            CartError::OutOfStockConfirmationRequired(_) => {
                FailureKind::OutOfStockConfirmationRequired
            }
            CartError::RemoteRejected(_) => FailureKind::RemoteRejected,
            CartError::NetworkFailure(_) => FailureKind::NetworkFailure,
        }
    }

    /// Human-readable text for the toast shown next to a reverted change.
    pub fn message(&self) -> String {
        match self {
            CartError::QuantityBelowMinimum => "Quantity must be at least 1".to_string(),
            CartError::StockExceeded { remaining } => {
                format!("Only {} left in stock", remaining)
            }
            CartError::LineNotFound(_) => "This item is no longer in your cart".to_string(),
            CartError::OutOfStockConfirmationRequired(_) => {
                "This item is out of stock. Remove it from your cart?".to_string()
            }
            CartError::RemoteRejected(message) if !message.trim().is_empty() => message.clone(),
            CartError::RemoteRejected(_) => "The store rejected this change".to_string(),
            CartError::NetworkFailure(_) => {
                "Network error, your change was not saved. Please try again".to_string()
            }
        }
    }
}

impl From<RemoteCartError> for CartError {
    fn from(error: RemoteCartError) -> Self {
        match error {
            RemoteCartError::Rejected(message) => CartError::RemoteRejected(message),
            RemoteCartError::Network(message) => CartError::NetworkFailure(message),
        }
    }
}
