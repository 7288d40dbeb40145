//! Tagged JSON events carried over the realtime socket.

use serde::{Deserialize, Serialize};

use super::RealtimeError;
use crate::ids::ConversationId;
use crate::store::domain::{Message, SenderType};

/// Events a connection may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A question for the data assistant.
    ChatMessage {
        /// Free-text query.
        query: String,
    },
    /// A message to append to a conversation and broadcast.
    #[serde(rename_all = "camelCase")]
    ConversationMessage {
        /// Target conversation.
        conversation_id: ConversationId,
        /// Author identifier.
        sender_id: String,
        /// Author kind.
        sender_type: SenderType,
        /// Message body.
        content: String,
    },
}

impl InboundEvent {
    /// Parses a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`RealtimeError::MalformedFrame`] when the frame is not a
    /// known tagged event.
    pub fn parse(frame: &str) -> Result<Self, RealtimeError> {
        serde_json::from_str(frame).map_err(|error| RealtimeError::MalformedFrame {
            reason: error.to_string(),
        })
    }

    /// Returns the wire tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ChatMessage { .. } => "chat_message",
            Self::ConversationMessage { .. } => "conversation_message",
        }
    }
}

/// Events the server pushes to connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// Assistant answer, sent to the asking connection only.
    ChatResponse {
        /// Answer text.
        message: String,
        /// RFC 3339 UTC instant the answer was produced.
        timestamp: String,
    },
    /// A stored conversation message, broadcast to every connection.
    NewMessage {
        /// The stored message.
        message: Message,
    },
}

impl OutboundEvent {
    /// Serialises the event as a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`RealtimeError::Encode`] if serialisation fails.
    pub fn to_frame(&self) -> Result<String, RealtimeError> {
        serde_json::to_string(self).map_err(|error| RealtimeError::Encode {
            reason: error.to_string(),
        })
    }
}
