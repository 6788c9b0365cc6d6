//! Error types for the wire codec.

use thiserror::Error;

/// Errors that can occur while encoding or decoding wire values.
#[derive(Debug, Error)]
pub enum WireError {
    /// Event encoding failed.
    #[error("Event encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Event decoding failed.
    #[error("Event decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
