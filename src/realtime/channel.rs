//! Per-frame dispatch for the realtime channel.

use std::sync::Arc;

use chrono::SecondsFormat;
use mockable::Clock;
use tracing::{debug, info, warn};

use super::{
    ConnectionId, ConnectionRegistry, InboundEvent, OutboundEvent, OutboundReceiver,
    RealtimeError,
};
use crate::access::{AccessPolicy, Action};
use crate::assistant::QueryResponder;
use crate::config::{FrameFaultPolicy, HandshakeAuth, RealtimeConfig};
use crate::identity::domain::User;
use crate::ids::{ConversationId, UserId};
use crate::store::{domain::NewMessage, ports::DashboardStore};

/// What the socket pump should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The event was handled.
    Handled,
    /// The event parsed but handling failed; the failure was logged.
    Rejected,
    /// The frame was unparseable and has been dropped.
    Dropped,
    /// The connection should be closed.
    Close,
}

/// The realtime channel: registry, assistant, and storage wired together.
pub struct RealtimeChannel {
    registry: Arc<ConnectionRegistry>,
    responder: Arc<QueryResponder>,
    store: Arc<dyn DashboardStore>,
    clock: Arc<dyn Clock + Send + Sync>,
    config: RealtimeConfig,
}

impl std::fmt::Debug for RealtimeChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeChannel")
            .field("connections", &self.registry.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RealtimeChannel {
    /// Wires a channel over an injected registry.
    #[must_use]
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        responder: Arc<QueryResponder>,
        store: Arc<dyn DashboardStore>,
        clock: Arc<dyn Clock + Send + Sync>,
        config: RealtimeConfig,
    ) -> Self {
        Self {
            registry,
            responder,
            store,
            clock,
            config,
        }
    }

    /// Returns the shared connection registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Returns the channel settings.
    #[must_use]
    pub const fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    /// Registers a new connection.
    #[must_use]
    pub fn connect(&self, user: Option<User>) -> (ConnectionId, OutboundReceiver) {
        let user_id = user.as_ref().map(|u| u.id().clone());
        let (id, receiver) = self.registry.register(user);
        info!(
            connection_id = %id,
            user_id = user_id.as_ref().map(UserId::as_str),
            live = self.registry.len(),
            "realtime client connected"
        );
        (id, receiver)
    }

    /// Removes a connection.
    pub fn disconnect(&self, id: ConnectionId) {
        if self.registry.unregister(id) {
            info!(connection_id = %id, live = self.registry.len(), "realtime client disconnected");
        }
    }

    /// Handles one text frame from `id`.
    pub async fn handle_text(&self, id: ConnectionId, frame: &str) -> FrameOutcome {
        match InboundEvent::parse(frame) {
            Ok(event) => self.handle_event(id, event).await,
            Err(error) => self.fault(id, &error),
        }
    }

    /// Handles one binary frame from `id`; binary frames never parse.
    #[must_use]
    pub fn handle_binary(&self, id: ConnectionId) -> FrameOutcome {
        self.fault(id, &RealtimeError::BinaryFrame)
    }

    /// Handles one decoded event from `id`.
    pub async fn handle_event(&self, id: ConnectionId, event: InboundEvent) -> FrameOutcome {
        let kind = event.kind();
        match self.dispatch(id, event).await {
            Ok(()) => FrameOutcome::Handled,
            Err(error) => {
                warn!(connection_id = %id, event = kind, reason = %error, "realtime event failed");
                FrameOutcome::Rejected
            }
        }
    }

    fn fault(&self, id: ConnectionId, error: &RealtimeError) -> FrameOutcome {
        warn!(
            connection_id = %id,
            reason = %error,
            policy = ?self.config.fault_policy,
            "dropping unparseable realtime frame"
        );
        match self.config.fault_policy {
            FrameFaultPolicy::LogAndDrop => FrameOutcome::Dropped,
            FrameFaultPolicy::Disconnect => FrameOutcome::Close,
        }
    }

    async fn dispatch(&self, id: ConnectionId, event: InboundEvent) -> Result<(), RealtimeError> {
        match event {
            InboundEvent::ChatMessage { query } => self.answer(id, &query).await,
            InboundEvent::ConversationMessage {
                conversation_id,
                sender_id,
                sender_type,
                content,
            } => {
                self.authorize_write(id, &conversation_id).await?;
                self.publish(NewMessage::text(
                    conversation_id,
                    sender_id,
                    sender_type,
                    content,
                ))
                .await
            }
        }
    }

    async fn answer(&self, id: ConnectionId, query: &str) -> Result<(), RealtimeError> {
        let message = self.responder.respond(query).await?;
        let timestamp = self
            .clock
            .utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        if !self
            .registry
            .send_to(id, OutboundEvent::ChatResponse { message, timestamp })
        {
            debug!(connection_id = %id, "asker left before the answer was ready");
        }
        Ok(())
    }

    async fn authorize_write(
        &self,
        id: ConnectionId,
        conversation_id: &ConversationId,
    ) -> Result<(), RealtimeError> {
        if self.config.handshake_auth == HandshakeAuth::Open {
            return Ok(());
        }
        let conversation = self
            .store
            .find_conversation(conversation_id)
            .await?
            .ok_or_else(|| RealtimeError::UnknownConversation(conversation_id.clone()))?;
        let user = self.registry.user(id);
        AccessPolicy::authorize(user.as_ref(), &Action::CreateMessage(&conversation.client_id))?;
        Ok(())
    }

    async fn publish(&self, message: NewMessage) -> Result<(), RealtimeError> {
        let stored = self.store.create_message(message).await?;
        let event = OutboundEvent::NewMessage { message: stored };
        let report = self.registry.broadcast(&event);
        debug!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "broadcast new message"
        );
        Ok(())
    }
}
