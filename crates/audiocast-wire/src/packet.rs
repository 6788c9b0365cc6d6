//! Packet-kind framing and frame validation.

use bytes::{BufMut, Bytes, BytesMut};

/// Length of the leading packet-kind byte.
pub const PACKET_KIND_LEN: usize = 1;

/// Length of the nonce carried by every encrypted audio frame.
pub const NONCE_LEN: usize = 24;

/// Smallest well-formed audio frame: kind byte, nonce, and at least one
/// ciphertext byte.
pub const MIN_AUDIO_FRAME_LEN: usize = PACKET_KIND_LEN + NONCE_LEN + 1;

/// The leading byte distinguishing raw audio from structured events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketKind {
    /// An encrypted audio frame, forwarded unmodified.
    Audio = 0x00,

    /// A serialized session event (currently only the disconnect event).
    Event = 0x01,
}

impl PacketKind {
    /// Returns the on-wire byte for this kind.
    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Parses a packet-kind byte.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Self::Audio),
            0x01 => Some(Self::Event),
            _ => None,
        }
    }
}

/// Checks that a sender frame carries ciphertext beyond the kind byte and
/// nonce. Anything shorter indicates a broken upstream protocol state.
pub fn audio_frame_is_well_formed(frame: &[u8]) -> bool {
    frame.len() >= MIN_AUDIO_FRAME_LEN
}

/// Wraps an encoded event with the event packet-kind prefix.
pub fn frame_event(payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(PACKET_KIND_LEN + payload.len());
    buf.put_u8(PacketKind::Event.raw());
    buf.put_slice(payload);
    buf.freeze()
}
