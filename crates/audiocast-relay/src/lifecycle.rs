//! Group teardown.

use std::sync::atomic::Ordering;

use tracing::{debug, error, info, instrument};

use audiocast_wire::{frame_event, DisconnectEvent, DisconnectReason};

use crate::connection::Connection;
use crate::engine;
use crate::session::RelaySession;

impl<C: Connection> RelaySession<C> {
    /// Tears the whole session down: notify receivers, close and clear the
    /// registry, then notify and close the sender.
    ///
    /// Idempotent; repeated or concurrent invocations are no-ops.
    #[instrument(name = "session_teardown", skip(self), fields(session = %self.shared.id))]
    pub async fn shutdown(&self, reason: DisconnectReason) {
        if self.shared.torn_down.swap(true, Ordering::SeqCst) {
            debug!("session already torn down");
            return;
        }

        info!(?reason, code = reason.close_code(), "tearing down session");

        let event_bytes = match DisconnectEvent::new(reason).encode() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                // Still close every connection; the notification is best-effort.
                error!(error = %e, "disconnect event encode failed");
                None
            }
        };

        // Give receivers disconnect information through the normal fan-out
        // path before their connections go away.
        if let Some(ref bytes) = event_bytes {
            let framed = frame_event(bytes);
            let members = self.shared.receivers.snapshot();
            engine::fan_out(&members, &framed).await;
        }

        // Closing the registry and removing every member is one critical
        // section; no receiver registered after this point survives.
        let drained = self.shared.receivers.drain();
        for receiver in &drained {
            if let Err(e) = receiver.close(reason.close_code()).await {
                debug!(receiver = %receiver.id(), error = %e, "receiver close failed");
            }
        }

        // Give the sender the unwrapped event, then close it.
        if let Some(sender) = self.shared.sender.get() {
            if let Some(ref bytes) = event_bytes {
                if let Err(e) = sender.send(bytes.clone()).await {
                    debug!(error = %e, "sender event send failed");
                }
            }
            if let Err(e) = sender.close(reason.close_code()).await {
                debug!(error = %e, "sender close failed");
            }
        }

        info!(closed_receivers = drained.len(), "session torn down");
    }
}
