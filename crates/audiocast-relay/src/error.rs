//! Error types for the session core.

use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The broadcast task was started before a sender was bound.
    #[error("Sender is not bound")]
    SenderNotBound,

    /// A second sender bind was attempted.
    #[error("Sender is already bound")]
    SenderAlreadyBound,

    /// The session has been torn down.
    #[error("Session is closed")]
    SessionClosed,
}
