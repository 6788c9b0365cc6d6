//! Frame fan-out and the broadcast loop.

use std::sync::atomic::Ordering;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::{debug, trace, warn};

use audiocast_wire::{audio_frame_is_well_formed, DisconnectReason};

use crate::connection::{Connection, ConnectionError};
use crate::session::RelaySession;

/// Outcome of fanning one frame out to a membership snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FanOut {
    pub(crate) delivered: usize,
    pub(crate) skipped: usize,
    pub(crate) failed: usize,
}

/// Sends one frame to every active member of a membership snapshot.
///
/// A failed send is contained to that receiver; the rest still get the
/// frame. No retry, no buffering.
pub(crate) async fn fan_out<C: Connection>(members: &[C], frame: &Bytes) -> FanOut {
    let mut outcome = FanOut::default();

    for member in members {
        if !member.is_active() {
            outcome.skipped += 1;
            continue;
        }

        match member.send(frame.clone()).await {
            Ok(()) => outcome.delivered += 1,
            Err(e) => {
                outcome.failed += 1;
                warn!(receiver = %member.id(), error = %e, "fan-out send failed");
            }
        }
    }

    outcome
}

/// Consumes the sender's inbound frames for the life of the session.
///
/// Each well-formed frame is relayed to a fresh membership snapshot, so
/// per-receiver delivery order matches sender emission order. A malformed
/// frame is fatal to the whole session. The loop ends when the stream ends,
/// the stream errors, or the session is torn down.
pub(crate) async fn broadcast_loop<C, St>(session: RelaySession<C>, mut frames: St)
where
    C: Connection,
    St: Stream<Item = Result<Bytes, ConnectionError>> + Unpin,
{
    while let Some(next) = frames.next().await {
        if session.is_closed() {
            break;
        }

        let frame = match next {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "sender stream error");
                break;
            }
        };

        if !audio_frame_is_well_formed(&frame) {
            warn!(len = frame.len(), "malformed sender frame, tearing down session");
            session.shutdown(DisconnectReason::InvalidPayload).await;
            break;
        }

        let members = session.shared.receivers.snapshot();
        let outcome = fan_out(&members, &frame).await;

        let counters = &session.shared.counters;
        counters.frames_relayed.fetch_add(1, Ordering::Relaxed);
        counters.bytes_relayed.fetch_add(frame.len() as u64, Ordering::Relaxed);
        counters.failed_sends.fetch_add(outcome.failed as u64, Ordering::Relaxed);

        trace!(
            delivered = outcome.delivered,
            skipped = outcome.skipped,
            failed = outcome.failed,
            "frame relayed"
        );
    }

    debug!("broadcast loop ended");
}
