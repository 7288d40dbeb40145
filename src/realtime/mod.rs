//! Realtime channel: WebSocket connections, event dispatch, and broadcast.
//!
//! Each connection is `Open` until it closes; nothing about it survives
//! closing. Inbound frames are tagged JSON events:
//!
//! - `chat_message` is answered by the data assistant with one
//!   `chat_response` sent to the asking connection only.
//! - `conversation_message` is stored and then broadcast as `new_message`
//!   to every live connection, sender included.
//!
//! Unparseable frames are handled by the configured
//! [`crate::config::FrameFaultPolicy`]; no error frame is ever sent.

mod channel;
mod error;
mod events;
mod registry;
mod socket;

pub use channel::{FrameOutcome, RealtimeChannel};
pub use error::RealtimeError;
pub use events::{InboundEvent, OutboundEvent};
pub use registry::{
    BroadcastReport, ConnectionId, ConnectionRegistry, OutboundReceiver, OutboundSender,
};
pub use socket::serve_socket;

#[cfg(test)]
mod tests;
