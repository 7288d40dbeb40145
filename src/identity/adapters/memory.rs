//! In-memory implementation of the `SessionStore` port.
//!
//! Passwords are held only as salted SHA-256 digests.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::identity::{
    domain::{Session, SessionLookup, SessionToken, User},
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};
use crate::ids::UserId;

struct Account {
    user: User,
    salt: String,
    digest: String,
}

#[derive(Default)]
struct SessionState {
    accounts: HashMap<String, Account>,
    sessions: HashMap<SessionToken, Session>,
}

impl SessionState {
    fn user_by_id(&self, id: &UserId) -> Option<&User> {
        self.accounts
            .values()
            .map(|account| &account.user)
            .find(|user| user.id() == id)
    }
}

/// In-memory implementation of [`SessionStore`].
///
/// Clones share accounts and sessions.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    state: Arc<RwLock<SessionState>>,
}

impl std::fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySessionStore")
            .field("sessions", &self.session_count())
            .finish_non_exhaustive()
    }
}

impl InMemorySessionStore {
    /// Creates a store with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account while building the store.
    ///
    /// A duplicate username replaces the earlier account.
    #[must_use]
    pub fn with_account(self, user: User, password: &str) -> Self {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let account = Self::account(user, password);
            state
                .accounts
                .insert(account.user.username().to_owned(), account);
        }
        self
    }

    /// Registers an account.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::DuplicateUsername`] when the username is
    /// taken, or a persistence error if the lock is poisoned.
    pub fn register(&self, user: User, password: &str) -> SessionStoreResult<()> {
        let mut state = self.write()?;
        if state.accounts.contains_key(user.username()) {
            return Err(SessionStoreError::DuplicateUsername(
                user.username().to_owned(),
            ));
        }
        let account = Self::account(user, password);
        state
            .accounts
            .insert(account.user.username().to_owned(), account);
        Ok(())
    }

    /// Returns the number of live sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.state
            .read()
            .map_or(0, |state| state.sessions.len())
    }

    fn account(user: User, password: &str) -> Account {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = password_digest(&salt, password);
        Account { user, salt, digest }
    }

    fn read(&self) -> SessionStoreResult<RwLockReadGuard<'_, SessionState>> {
        self.state
            .read()
            .map_err(|e| SessionStoreError::persistence(std::io::Error::other(e.to_string())))
    }

    fn write(&self) -> SessionStoreResult<RwLockWriteGuard<'_, SessionState>> {
        self.state
            .write()
            .map_err(|e| SessionStoreError::persistence(std::io::Error::other(e.to_string())))
    }
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> SessionStoreResult<Option<User>> {
        let state = self.read()?;
        Ok(state.accounts.get(username).and_then(|account| {
            let candidate = password_digest(&account.salt, password);
            constant_time_eq(candidate.as_bytes(), account.digest.as_bytes())
                .then(|| account.user.clone())
        }))
    }

    async fn save_session(&self, session: &Session) -> SessionStoreResult<()> {
        let mut state = self.write()?;
        let now = session.created_at();
        state.sessions.retain(|_, stored| !stored.is_expired_at(now));
        state
            .sessions
            .insert(session.token().clone(), session.clone());
        Ok(())
    }

    async fn find_session(
        &self,
        token: &SessionToken,
    ) -> SessionStoreResult<Option<SessionLookup>> {
        let state = self.read()?;
        Ok(state.sessions.get(token).and_then(|session| {
            state.user_by_id(session.user_id()).map(|user| SessionLookup {
                session: session.clone(),
                user: user.clone(),
            })
        }))
    }

    async fn revoke_session(&self, token: &SessionToken) -> SessionStoreResult<()> {
        let mut state = self.write()?;
        state.sessions.remove(token);
        Ok(())
    }
}
