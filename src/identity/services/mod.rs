//! Service layer for authentication.

mod authenticator;

pub use authenticator::{AuthResult, BEARER_PREFIX, SessionAuthenticator};
