//! Connection-handle seam between the session core and the transport layer.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Identity of an accepted connection, assigned by the hosting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ConnectionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Errors surfaced by a connection handle.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The connection is already closed.
    #[error("Connection closed")]
    Closed,

    /// Sending a frame failed.
    #[error("Send failed: {0}")]
    Send(String),

    /// Closing the connection failed.
    #[error("Close failed: {0}")]
    Close(String),

    /// Transport-level IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound half of an accepted duplex connection.
///
/// Handles come out of the external handshake layer and are expected to be
/// cheap clones of one shared underlying connection, so membership snapshots
/// can copy them freely. The sender's inbound frames arrive separately as a
/// stream; this trait only covers the half the session writes to.
#[async_trait]
pub trait Connection: Clone + Send + Sync + 'static {
    /// Identity used for registry membership.
    fn id(&self) -> ConnectionId;

    /// Whether the peer is still reachable.
    fn is_active(&self) -> bool;

    /// Sends one binary frame to the peer.
    async fn send(&self, frame: Bytes) -> Result<(), ConnectionError>;

    /// Closes the connection with a network-level close code.
    async fn close(&self, code: u16) -> Result<(), ConnectionError>;
}
