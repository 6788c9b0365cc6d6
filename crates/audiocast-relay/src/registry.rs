//! Receiver membership.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::connection::{Connection, ConnectionId};
use crate::error::RelayError;
use crate::RelayResult;

/// The set of receivers currently subscribed to the broadcast.
///
/// The container is guarded only for the duration of a mutation or snapshot;
/// network sends never run under the lock.
pub(crate) struct Registry<C> {
    inner: Mutex<Inner<C>>,
}

struct Inner<C> {
    members: HashMap<ConnectionId, C>,
    closed: bool,
}

impl<C: Connection> Registry<C> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                members: HashMap::new(),
                closed: false,
            }),
        }
    }

    /// Registers a receiver. Re-registering an id replaces the stale handle.
    pub fn add(&self, receiver: C) -> RelayResult<()> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(RelayError::SessionClosed);
        }

        let id = receiver.id();
        if inner.members.insert(id, receiver).is_some() {
            debug!(receiver = %id, "replaced stale receiver handle");
        }
        Ok(())
    }

    /// Removes a receiver, returning its handle if it was registered.
    pub fn remove(&self, id: ConnectionId) -> Option<C> {
        self.inner.lock().members.remove(&id)
    }

    /// Point-in-time copy of the membership, so fan-out never holds the lock
    /// and concurrent mutation never affects an in-flight broadcast.
    pub fn snapshot(&self) -> Vec<C> {
        self.inner.lock().members.values().cloned().collect()
    }

    /// Closes the registry and removes every member in one critical section.
    /// Receivers registered after this point are rejected.
    pub fn drain(&self) -> Vec<C> {
        let mut inner = self.inner.lock();
        inner.closed = true;
        inner.members.drain().map(|(_, receiver)| receiver).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockConnection;

    #[test]
    fn test_add_and_remove() {
        let registry = Registry::new();

        registry.add(MockConnection::new(1)).unwrap();
        registry.add(MockConnection::new(2)).unwrap();
        assert_eq!(registry.len(), 2);

        let removed = registry.remove(ConnectionId(1)).unwrap();
        assert_eq!(removed.id(), ConnectionId(1));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(ConnectionId(99)).is_none());
    }

    #[test]
    fn test_add_replaces_same_id() {
        let registry = Registry::new();

        registry.add(MockConnection::new(1)).unwrap();
        registry.add(MockConnection::new(1)).unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_is_point_in_time() {
        let registry = Registry::new();
        registry.add(MockConnection::new(1)).unwrap();
        registry.add(MockConnection::new(2)).unwrap();

        let snapshot = registry.snapshot();
        registry.remove(ConnectionId(1));

        assert_eq!(snapshot.len(), 2);
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn test_drain_closes_registry() {
        let registry = Registry::new();
        registry.add(MockConnection::new(1)).unwrap();
        registry.add(MockConnection::new(2)).unwrap();

        let drained = registry.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(registry.len(), 0);

        let err = registry.add(MockConnection::new(3)).unwrap_err();
        assert!(matches!(err, RelayError::SessionClosed));
        assert_eq!(registry.len(), 0);
    }
}
