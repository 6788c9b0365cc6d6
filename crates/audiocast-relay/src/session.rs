//! The per-broadcast session manager.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use futures::Stream;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::connection::{Connection, ConnectionError, ConnectionId};
use crate::engine;
use crate::error::RelayError;
use crate::registry::Registry;
use crate::slot::SenderSlot;
use crate::RelayResult;

/// One live broadcast session: a single sender fanned out to any number of
/// receivers.
///
/// Cloning is cheap; all clones share the same session state.
pub struct RelaySession<C: Connection> {
    pub(crate) shared: Arc<Shared<C>>,
}

impl<C: Connection> Clone for RelaySession<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

pub(crate) struct Shared<C: Connection> {
    pub(crate) id: String,
    pub(crate) sender: SenderSlot<C>,
    pub(crate) receivers: Registry<C>,
    pub(crate) torn_down: AtomicBool,
    pub(crate) counters: Counters,
}

#[derive(Default)]
pub(crate) struct Counters {
    pub(crate) frames_relayed: AtomicU64,
    pub(crate) bytes_relayed: AtomicU64,
    pub(crate) failed_sends: AtomicU64,
}

/// Point-in-time delivery statistics for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayStatistics {
    /// Valid frames consumed from the sender and fanned out.
    pub frames_relayed: u64,

    /// Total payload bytes of those frames.
    pub bytes_relayed: u64,

    /// Per-receiver sends that failed and were contained.
    pub failed_sends: u64,
}

impl<C: Connection> RelaySession<C> {
    /// Creates the session manager for one broadcast.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        debug!(session = %id, "session created");

        Self {
            shared: Arc::new(Shared {
                id,
                sender: SenderSlot::new(),
                receivers: Registry::new(),
                torn_down: AtomicBool::new(false),
                counters: Counters::default(),
            }),
        }
    }

    /// Binds the authoritative sender. The slot is single-assignment.
    pub fn bind_sender(&self, sender: C) -> RelayResult<()> {
        if self.is_closed() {
            return Err(RelayError::SessionClosed);
        }

        self.shared.sender.bind(sender)?;
        info!(session = %self.shared.id, "sender bound");
        Ok(())
    }

    /// Registers a receiver for fan-out copies of the stream.
    pub fn add_receiver(&self, receiver: C) -> RelayResult<()> {
        let id = receiver.id();
        self.shared.receivers.add(receiver)?;
        debug!(session = %self.shared.id, receiver = %id, "receiver registered");
        Ok(())
    }

    /// Unregisters a receiver, returning its handle if it was registered.
    /// The connection itself is left open; closing it is the caller's call.
    pub fn remove_receiver(&self, id: ConnectionId) -> Option<C> {
        let removed = self.shared.receivers.remove(id);
        if removed.is_some() {
            debug!(session = %self.shared.id, receiver = %id, "receiver unregistered");
        }
        removed
    }

    /// Number of currently registered receivers.
    pub fn receiver_count(&self) -> usize {
        self.shared.receivers.len()
    }

    /// Whether the session has been torn down.
    pub fn is_closed(&self) -> bool {
        self.shared.torn_down.load(Ordering::SeqCst)
    }

    /// Delivery statistics accumulated so far.
    pub fn statistics(&self) -> RelayStatistics {
        let counters = &self.shared.counters;
        RelayStatistics {
            frames_relayed: counters.frames_relayed.load(Ordering::Relaxed),
            bytes_relayed: counters.bytes_relayed.load(Ordering::Relaxed),
            failed_sends: counters.failed_sends.load(Ordering::Relaxed),
        }
    }

    /// Spawns the broadcast task consuming the sender's inbound frames.
    ///
    /// Starting before a sender is bound is an initialization-ordering fault
    /// and is surfaced instead of spawning.
    #[instrument(name = "session_listen", skip(self, frames), fields(session = %self.shared.id))]
    pub fn listen<St>(&self, frames: St) -> RelayResult<JoinHandle<()>>
    where
        St: Stream<Item = Result<Bytes, ConnectionError>> + Send + Unpin + 'static,
    {
        if self.is_closed() {
            return Err(RelayError::SessionClosed);
        }
        if !self.shared.sender.is_bound() {
            return Err(RelayError::SenderNotBound);
        }

        info!("broadcast task starting");
        Ok(tokio::spawn(engine::broadcast_loop(self.clone(), frames)))
    }
}
