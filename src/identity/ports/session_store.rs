//! Port for user accounts and session persistence.

use crate::identity::domain::{Session, SessionLookup, SessionToken, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// An account with the same username already exists.
    #[error("username already registered: {0}")]
    DuplicateUsername(String),

    /// The backing store failed.
    #[error("session store failure: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a backend error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Port for credential checks and session bookkeeping.
///
/// Implementations must make a revoked session unresolvable by every
/// subsequent [`SessionStore::find_session`] call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Checks a username/password pair.
    ///
    /// Returns the matching user, or `None` when either part is wrong.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the store fails.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> SessionStoreResult<Option<User>>;

    /// Persists a newly issued session.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the store fails.
    async fn save_session(&self, session: &Session) -> SessionStoreResult<()>;

    /// Resolves a token to its session and user in a single lookup.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the store fails.
    async fn find_session(&self, token: &SessionToken)
    -> SessionStoreResult<Option<SessionLookup>>;

    /// Removes a session. Removing an unknown token is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionStoreError` if the store fails.
    async fn revoke_session(&self, token: &SessionToken) -> SessionStoreResult<()>;
}
