/// Errors returned by the remote cart service port.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteCartError {
    /// The backend answered but refused the change (business rule, stale stock, ...).
    #[error("remote.rejected")]
    Rejected(String),
    /// The request did not complete: timeout, connectivity or an unreadable response.
    #[error("remote.network")]
    Network(String),
}

impl RemoteCartError {
    pub fn rejected(message: impl Into<String>) -> Self {
        RemoteCartError::Rejected(message.into())
    }
    pub fn network(message: impl Into<String>) -> Self {
        RemoteCartError::Network(message.into())
    }
}
