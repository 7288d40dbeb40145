//! Domain types for identity: users, roles, sessions, credentials.

mod credentials;
mod error;
mod session;
mod user;

pub use credentials::Credentials;
pub use error::{AuthError, ParseRoleError};
pub use session::{LoginGrant, Session, SessionLookup, SessionToken};
pub use user::{Role, User};
