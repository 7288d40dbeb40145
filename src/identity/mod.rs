//! Identity: users, sessions, and bearer-token authentication.
//!
//! Login issues an opaque token bound to a user and an expiry. Every
//! authenticated request resolves its token through
//! [`services::SessionAuthenticator`], which performs a single store lookup
//! and treats expired sessions exactly like unknown ones.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
