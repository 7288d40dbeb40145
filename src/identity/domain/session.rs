//! Sessions and the opaque bearer tokens that name them.

use super::User;
use crate::ids::UserId;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque bearer token.
///
/// The token carries no structure the service relies on. Its `Debug`
/// output is redacted so tokens never reach logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mints a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        ))
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// A token-to-user mapping with an expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
    user_id: UserId,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Issues a session for `user_id` that lives for `ttl` from now.
    ///
    /// Returns `None` when the expiry is not representable.
    #[must_use]
    pub fn issue(user_id: UserId, ttl: TimeDelta, clock: &(impl Clock + ?Sized)) -> Option<Self> {
        let created_at = clock.utc();
        let expires_at = created_at.checked_add_signed(ttl)?;
        Some(Self {
            token: SessionToken::generate(),
            user_id,
            created_at,
            expires_at,
        })
    }

    /// Rebuilds a session from stored parts.
    #[must_use]
    pub const fn from_parts(
        token: SessionToken,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            user_id,
            created_at,
            expires_at,
        }
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns when the session was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session stops being valid.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` once `now` has reached the expiry instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Result of a session lookup: the session and the user it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLookup {
    /// The stored session.
    pub session: Session,
    /// The user the session belongs to.
    pub user: User,
}

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginGrant {
    /// The authenticated user.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub token: SessionToken,
}
