//! Close-reason vocabulary.

use serde::{Deserialize, Serialize};

/// Why a session (or one of its connections) was closed.
///
/// Serialized in SCREAMING_SNAKE_CASE so the wire names match the protocol
/// vocabulary understood by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisconnectReason {
    /// The broadcast ended normally.
    Normal,

    /// The upstream sender hung up.
    SenderClosed,

    /// A sender frame failed validation.
    InvalidPayload,

    /// Unrecoverable internal fault.
    Internal,
}

impl DisconnectReason {
    /// Returns the network-level close code for this reason.
    pub fn close_code(self) -> u16 {
        match self {
            Self::Normal => 1000,
            Self::SenderClosed => 4000,
            Self::InvalidPayload => 4001,
            Self::Internal => 4002,
        }
    }

    /// Returns a display message for this reason.
    pub fn message(self) -> &'static str {
        match self {
            Self::Normal => "Broadcast ended",
            Self::SenderClosed => "Sender disconnected",
            Self::InvalidPayload => "Malformed audio frame",
            Self::Internal => "Internal error",
        }
    }
}
