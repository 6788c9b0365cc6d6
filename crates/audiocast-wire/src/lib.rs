//! Wire format for the audio relay.
//!
//! This crate defines the packet-kind framing, the close-reason vocabulary
//! and the disconnect-event codec shared between the session core and the
//! hosting connection layer.

mod error;
mod event;
mod packet;
mod reason;

pub use error::WireError;
pub use event::DisconnectEvent;
pub use packet::{
    audio_frame_is_well_formed, frame_event, PacketKind, MIN_AUDIO_FRAME_LEN, NONCE_LEN,
    PACKET_KIND_LEN,
};
pub use reason::DisconnectReason;

/// Result type for wire codec operations.
pub type WireResult<T> = Result<T, WireError>;
