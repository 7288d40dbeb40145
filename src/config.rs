//! Server configuration.
//!
//! Every knob has a default that reproduces the stock behaviour, so
//! `ServerConfig::default()` is a complete, runnable configuration.

use std::net::SocketAddr;

use chrono::TimeDelta;
use clap::ValueEnum;
use thiserror::Error;

use crate::ids::UserId;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Manager whose clients feed dashboard metrics and the assistant when no
/// manager is named explicitly.
pub const DEFAULT_MANAGER_ID: &str = "csm-1";

/// Default realtime socket path.
pub const DEFAULT_SOCKET_PATH: &str = "/ws";

/// Default session lifetime in hours.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Longest accepted session lifetime in hours (one leap year).
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 366;

/// Errors raised while building a configuration from raw values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The session lifetime is not in `1..=MAX_SESSION_TTL_HOURS`.
    #[error("session lifetime must be between 1 and {MAX_SESSION_TTL_HOURS} hours, got {hours}")]
    InvalidSessionTtl {
        /// The rejected value.
        hours: i64,
    },
}

/// Converts a session lifetime in hours, rejecting non-positive or
/// oversized values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSessionTtl`] outside
/// `1..=MAX_SESSION_TTL_HOURS`.
pub fn session_ttl_from_hours(hours: i64) -> Result<TimeDelta, ConfigError> {
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        return Err(ConfigError::InvalidSessionTtl { hours });
    }
    TimeDelta::try_hours(hours).ok_or(ConfigError::InvalidSessionTtl { hours })
}

/// What the realtime channel does with a frame it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FrameFaultPolicy {
    /// Log the frame and keep the connection open.
    #[default]
    LogAndDrop,
    /// Log the frame and close that connection.
    Disconnect,
}

/// Whether the realtime handshake must carry a bearer token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum HandshakeAuth {
    /// Anyone may connect; connections carry no user.
    #[default]
    Open,
    /// The upgrade request must authenticate. The user is attached to the
    /// connection and conversation writes are authorized against it.
    RequireBearer,
}

/// Realtime channel settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeConfig {
    /// Path the socket is served on.
    pub path: String,
    /// Bad-frame handling.
    pub fault_policy: FrameFaultPolicy,
    /// Handshake authentication mode.
    pub handshake_auth: HandshakeAuth,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_SOCKET_PATH.to_owned(),
            fault_policy: FrameFaultPolicy::default(),
            handshake_auth: HandshakeAuth::default(),
        }
    }
}

/// Top-level server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: SocketAddr,
    /// Manager used when a request names none.
    pub default_manager_id: UserId,
    /// How long an issued session stays valid.
    pub session_ttl: TimeDelta,
    /// Realtime channel settings.
    pub realtime: RealtimeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            default_manager_id: UserId::new(DEFAULT_MANAGER_ID),
            session_ttl: TimeDelta::hours(DEFAULT_SESSION_TTL_HOURS),
            realtime: RealtimeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Sets the listen address.
    #[must_use]
    pub const fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Sets the default manager.
    #[must_use]
    pub fn with_default_manager(mut self, manager_id: UserId) -> Self {
        self.default_manager_id = manager_id;
        self
    }

    /// Sets the session lifetime.
    #[must_use]
    pub const fn with_session_ttl(mut self, ttl: TimeDelta) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Sets the bad-frame policy.
    #[must_use]
    pub const fn with_fault_policy(mut self, policy: FrameFaultPolicy) -> Self {
        self.realtime.fault_policy = policy;
        self
    }

    /// Sets the handshake authentication mode.
    #[must_use]
    pub const fn with_handshake_auth(mut self, auth: HandshakeAuth) -> Self {
        self.realtime.handshake_auth = auth;
        self
    }
}
