//! Session core for the one-to-many audio relay.
//!
//! One authoritative sender streams encrypted audio frames in; every
//! registered receiver gets a fan-out copy in emission order, and the
//! session tears the whole group down when the broadcast ends for any
//! reason.

mod connection;
mod engine;
mod error;
mod lifecycle;
mod registry;
mod session;
mod slot;

#[cfg(test)]
mod mock;

pub use connection::{Connection, ConnectionError, ConnectionId};
pub use error::RelayError;
pub use session::{RelaySession, RelayStatistics};

/// Result type for session operations.
pub type RelayResult<T> = Result<T, RelayError>;
