//! Error types for authentication.

use crate::identity::ports::SessionStoreError;
use chrono::TimeDelta;
use thiserror::Error;

/// Errors returned by [`crate::identity::services::SessionAuthenticator`].
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No authorization header was supplied.
    #[error("missing authorization header")]
    MissingToken,

    /// The header does not start with exactly `Bearer ` or carries no token.
    #[error("authorization header is not a bearer token")]
    MalformedHeader,

    /// No session exists for the token.
    #[error("invalid or expired token")]
    UnknownSession,

    /// The session exists but has expired.
    #[error("invalid or expired token")]
    SessionExpired,

    /// Username or password did not match.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The login payload is incomplete.
    #[error("invalid login data: {0}")]
    InvalidLoginData(String),

    /// The configured session lifetime overflows the clock.
    #[error("session lifetime {ttl} cannot be added to the current time")]
    SessionLifetimeOverflow {
        /// The configured lifetime.
        ttl: TimeDelta,
    },

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl AuthError {
    /// Returns `true` for failures that mean "not authenticated" (401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::MissingToken
                | Self::MalformedHeader
                | Self::UnknownSession
                | Self::SessionExpired
                | Self::InvalidCredentials
        )
    }
}

/// Error returned while parsing a role string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
