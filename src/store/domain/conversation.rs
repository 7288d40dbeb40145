//! Conversation threads and their messages.
//!
//! Messages are append-only: once stored, only the read flag may change.

use super::validation::{ValidationResult, require_text};
use crate::ids::{ClientId, ConversationId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A thread of messages tied to exactly one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: ConversationId,
    /// The owning client.
    pub client_id: ClientId,
    /// The manager taking part, if any.
    pub csm_id: Option<UserId>,
    /// Optional subject line.
    pub subject: Option<String>,
    /// When the conversation was opened.
    pub created_at: DateTime<Utc>,
}

/// Inbound payload for opening a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConversation {
    /// The owning client.
    pub client_id: ClientId,
    /// The manager taking part.
    #[serde(default)]
    pub csm_id: Option<UserId>,
    /// Optional subject line.
    #[serde(default)]
    pub subject: Option<String>,
}

impl NewConversation {
    /// Creates a payload for the given client.
    #[must_use]
    pub const fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            csm_id: None,
            subject: None,
        }
    }

    /// Sets the participating manager.
    #[must_use]
    pub fn with_csm(mut self, csm_id: UserId) -> Self {
        self.csm_id = Some(csm_id);
        self
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`super::RecordValidationError`] when the client id is blank.
    pub fn validate(&self) -> ValidationResult {
        require_text("clientId", self.client_id.as_str())
    }

    /// Materialises the payload into a stored record.
    #[must_use]
    pub fn into_conversation(self, id: ConversationId, created_at: DateTime<Utc>) -> Conversation {
        Conversation {
            id,
            client_id: self.client_id,
            csm_id: self.csm_id,
            subject: self.subject,
            created_at,
        }
    }
}

/// Filter for conversation listings; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationFilter {
    /// Restrict to one client.
    pub client_id: Option<ClientId>,
    /// Restrict to one manager.
    pub csm_id: Option<UserId>,
}

impl ConversationFilter {
    /// A filter scoped to a single client.
    #[must_use]
    pub fn for_client(client_id: ClientId) -> Self {
        Self {
            client_id: Some(client_id),
            csm_id: None,
        }
    }

    /// Returns `true` when the conversation satisfies every set field.
    #[must_use]
    pub fn matches(&self, conversation: &Conversation) -> bool {
        self.client_id
            .as_ref()
            .is_none_or(|id| *id == conversation.client_id)
            && self
                .csm_id
                .as_ref()
                .is_none_or(|id| conversation.csm_id.as_ref() == Some(id))
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderType {
    /// A human participant.
    User,
    /// The assistant.
    Assistant,
}

impl SenderType {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport a message arrived through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Typed in the dashboard or sent over the realtime channel.
    #[default]
    Text,
    /// Imported from a mailbox.
    Email,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier.
    pub id: MessageId,
    /// The conversation the message belongs to.
    pub conversation_id: ConversationId,
    /// Identifier of the author.
    pub sender_id: String,
    /// Whether the author is a user or the assistant.
    pub sender_type: SenderType,
    /// Message body.
    pub content: String,
    /// How the message arrived.
    pub message_type: MessageKind,
    /// Whether the recipient has read the message.
    pub is_read: bool,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

/// Inbound payload for appending a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    /// The target conversation.
    pub conversation_id: ConversationId,
    /// Identifier of the author.
    pub sender_id: String,
    /// Whether the author is a user or the assistant.
    pub sender_type: SenderType,
    /// Message body.
    pub content: String,
    /// How the message arrived; defaults to text.
    #[serde(default)]
    pub message_type: MessageKind,
    /// Initial read flag; defaults to unread.
    #[serde(default)]
    pub is_read: bool,
}

impl NewMessage {
    /// Creates an unread text message.
    #[must_use]
    pub fn text(
        conversation_id: ConversationId,
        sender_id: impl Into<String>,
        sender_type: SenderType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id,
            sender_id: sender_id.into(),
            sender_type,
            content: content.into(),
            message_type: MessageKind::Text,
            is_read: false,
        }
    }

    /// Checks required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`super::RecordValidationError`] for a blank conversation,
    /// sender, or body.
    pub fn validate(&self) -> ValidationResult {
        require_text("conversationId", self.conversation_id.as_str())?;
        require_text("senderId", &self.sender_id)?;
        require_text("content", &self.content)
    }

    /// Materialises the payload into a stored record.
    #[must_use]
    pub fn into_message(self, id: MessageId, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            conversation_id: self.conversation_id,
            sender_id: self.sender_id,
            sender_type: self.sender_type,
            content: self.content,
            message_type: self.message_type,
            is_read: self.is_read,
            created_at,
        }
    }
}
