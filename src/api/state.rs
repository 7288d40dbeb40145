//! Shared handler state.

use std::sync::Arc;

use mockable::Clock;

use crate::assistant::{AssistantError, QueryResponder};
use crate::config::ServerConfig;
use crate::identity::{ports::SessionStore, services::SessionAuthenticator};
use crate::realtime::{ConnectionRegistry, RealtimeChannel};
use crate::store::ports::DashboardStore;

/// Everything a handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn DashboardStore>,
    authenticator: Arc<SessionAuthenticator>,
    channel: Arc<RealtimeChannel>,
    clock: Arc<dyn Clock + Send + Sync>,
    config: Arc<ServerConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wires the authenticator, assistant, and realtime channel over the
    /// given ports. The connection registry is created here, once.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError`] if the assistant templates fail to load.
    pub fn new(
        store: Arc<dyn DashboardStore>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock + Send + Sync>,
        config: ServerConfig,
    ) -> Result<Self, AssistantError> {
        let authenticator =
            SessionAuthenticator::new(sessions, Arc::clone(&clock), config.session_ttl);
        let responder = QueryResponder::new(Arc::clone(&store), config.default_manager_id.clone())?;
        let channel = RealtimeChannel::new(
            Arc::new(ConnectionRegistry::new()),
            Arc::new(responder),
            Arc::clone(&store),
            Arc::clone(&clock),
            config.realtime.clone(),
        );
        Ok(Self {
            store,
            authenticator: Arc::new(authenticator),
            channel: Arc::new(channel),
            clock,
            config: Arc::new(config),
        })
    }

    /// Returns the storage port.
    #[must_use]
    pub fn store(&self) -> &dyn DashboardStore {
        self.store.as_ref()
    }

    /// Returns the authenticator.
    #[must_use]
    pub fn authenticator(&self) -> &SessionAuthenticator {
        &self.authenticator
    }

    /// Returns the realtime channel.
    #[must_use]
    pub const fn channel(&self) -> &Arc<RealtimeChannel> {
        &self.channel
    }

    /// Returns the clock.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Returns the server settings.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
