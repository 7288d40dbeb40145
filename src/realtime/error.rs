//! Error types for the realtime channel.

use thiserror::Error;

use crate::access::AccessDenied;
use crate::assistant::AssistantError;
use crate::ids::ConversationId;
use crate::store::StoreError;

/// Failures while handling a realtime frame.
///
/// None of these are reported back over the socket; they are logged.
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// The frame is not a known tagged JSON event.
    #[error("malformed frame: {reason}")]
    MalformedFrame {
        /// Parser message.
        reason: String,
    },

    /// Binary frames carry no events.
    #[error("binary frames are not supported")]
    BinaryFrame,

    /// An outbound event failed to serialise.
    #[error("failed to encode event: {reason}")]
    Encode {
        /// Serialiser message.
        reason: String,
    },

    /// The target conversation does not exist.
    #[error("conversation not found: {0}")]
    UnknownConversation(ConversationId),

    /// The connection's user may not write to the conversation.
    #[error(transparent)]
    Denied(#[from] AccessDenied),

    /// The assistant failed to answer.
    #[error(transparent)]
    Assistant(#[from] AssistantError),

    /// A storage call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
