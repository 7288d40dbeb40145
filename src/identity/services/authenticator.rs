//! Bearer-token authentication over a [`SessionStore`].

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::identity::{
    domain::{AuthError, Credentials, LoginGrant, Session, SessionToken, User},
    ports::SessionStore,
};

/// Required prefix of the `Authorization` header value, case-sensitive.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Resolves bearer tokens to users and manages session lifetimes.
#[derive(Clone)]
pub struct SessionAuthenticator {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock + Send + Sync>,
    ttl: TimeDelta,
}

impl std::fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthenticator")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionAuthenticator {
    /// Creates an authenticator issuing sessions that live for `ttl`.
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock + Send + Sync>,
        ttl: TimeDelta,
    ) -> Self {
        Self { store, clock, ttl }
    }

    /// Extracts the token from an `Authorization` header value.
    ///
    /// The value must begin with exactly `Bearer ` followed by a non-empty
    /// token. Nothing is looked up.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingToken`] when no header is present and
    /// [`AuthError::MalformedHeader`] for any other shape.
    pub fn bearer_token(header: Option<&str>) -> AuthResult<SessionToken> {
        let value = header.ok_or(AuthError::MissingToken)?;
        let token = value
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AuthError::MalformedHeader)?;
        if token.is_empty() {
            return Err(AuthError::MalformedHeader);
        }
        Ok(SessionToken::new(token))
    }

    /// Authenticates a request from its `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns an unauthorized [`AuthError`] for missing, malformed, unknown,
    /// or expired tokens, and [`AuthError::Store`] if the lookup fails.
    pub async fn authenticate(&self, header: Option<&str>) -> AuthResult<User> {
        let token = Self::bearer_token(header)?;
        self.validate(&token).await
    }

    /// Resolves a token to its user with a single store lookup.
    ///
    /// An expired session is destroyed on the lookup that finds it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownSession`] or [`AuthError::SessionExpired`]
    /// when the token does not name a live session.
    pub async fn validate(&self, token: &SessionToken) -> AuthResult<User> {
        let lookup = self
            .store
            .find_session(token)
            .await?
            .ok_or(AuthError::UnknownSession)?;
        if lookup.session.is_expired_at(self.clock.utc()) {
            self.store.revoke_session(token).await?;
            debug!(user_id = %lookup.user.id(), "destroyed expired session");
            return Err(AuthError::SessionExpired);
        }
        Ok(lookup.user)
    }

    /// Verifies credentials and issues a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidLoginData`] for an incomplete payload,
    /// [`AuthError::InvalidCredentials`] when the pair does not match, and
    /// [`AuthError::SessionLifetimeOverflow`] when the expiry cannot be
    /// computed.
    pub async fn login(&self, credentials: &Credentials) -> AuthResult<LoginGrant> {
        credentials.validate()?;
        let Some(user) = self
            .store
            .verify_credentials(&credentials.username, &credentials.password)
            .await?
        else {
            warn!(username = %credentials.username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };
        let session = Session::issue(user.id().clone(), self.ttl, self.clock.as_ref())
            .ok_or(AuthError::SessionLifetimeOverflow { ttl: self.ttl })?;
        self.store.save_session(&session).await?;
        info!(user_id = %user.id(), role = %user.role(), "session issued");
        Ok(LoginGrant {
            user,
            token: session.token().clone(),
        })
    }

    /// Revokes a session. Revoking an unknown token succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if the store fails.
    pub async fn logout(&self, token: &SessionToken) -> AuthResult<()> {
        self.store.revoke_session(token).await?;
        debug!("session revoked");
        Ok(())
    }
}
