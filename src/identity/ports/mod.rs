//! Port definitions for the identity context.

mod session_store;

#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError, SessionStoreResult};
