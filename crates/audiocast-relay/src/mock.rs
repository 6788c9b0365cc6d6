//! Scriptable connection handle for deterministic tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;

use crate::connection::{Connection, ConnectionError, ConnectionId};

/// Records everything sent through it; sends can be scripted to fail and
/// liveness can be toggled.
#[derive(Clone)]
pub(crate) struct MockConnection {
    id: ConnectionId,
    active: Arc<AtomicBool>,
    fail_sends: Arc<AtomicBool>,
    sent: Arc<Mutex<Vec<Bytes>>>,
    close_codes: Arc<Mutex<Vec<u16>>>,
}

impl MockConnection {
    pub fn new(id: u64) -> Self {
        Self {
            id: ConnectionId(id),
            active: Arc::new(AtomicBool::new(true)),
            fail_sends: Arc::new(AtomicBool::new(false)),
            sent: Arc::new(Mutex::new(Vec::new())),
            close_codes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Bytes> {
        self.sent.lock().clone()
    }

    pub fn close_codes(&self) -> Vec<u16> {
        self.close_codes.lock().clone()
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    async fn send(&self, frame: Bytes) -> Result<(), ConnectionError> {
        if !self.is_active() {
            return Err(ConnectionError::Closed);
        }
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ConnectionError::Send("scripted failure".to_string()));
        }
        self.sent.lock().push(frame);
        Ok(())
    }

    async fn close(&self, code: u16) -> Result<(), ConnectionError> {
        if !self.active.swap(false, Ordering::SeqCst) {
            return Err(ConnectionError::Closed);
        }
        self.close_codes.lock().push(code);
        Ok(())
    }
}
