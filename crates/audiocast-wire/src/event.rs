//! Disconnect-event codec.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::WireError;
use crate::reason::DisconnectReason;
use crate::WireResult;

/// Structured notification sent to every connection during teardown.
///
/// Receivers get it wrapped with the event packet-kind prefix; the sender
/// gets the raw encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectEvent {
    /// Why the session ended.
    pub reason: DisconnectReason,
}

impl DisconnectEvent {
    /// Creates a disconnect event for the given reason.
    pub fn new(reason: DisconnectReason) -> Self {
        Self { reason }
    }

    /// Encodes the event to its wire bytes.
    pub fn encode(&self) -> WireResult<Bytes> {
        let encoded = serde_json::to_vec(self).map_err(WireError::Encode)?;
        Ok(Bytes::from(encoded))
    }

    /// Decodes an event from its wire bytes.
    pub fn decode(bytes: &[u8]) -> WireResult<Self> {
        serde_json::from_slice(bytes).map_err(WireError::Decode)
    }
}
