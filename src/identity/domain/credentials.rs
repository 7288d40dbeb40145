//! Login credentials.

use super::AuthError;
use serde::Deserialize;
use std::fmt;

/// Username and password submitted at login.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Plain-text password; never logged.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks that both fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidLoginData`] when either field is blank.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::InvalidLoginData("username is required".to_owned()));
        }
        if self.password.is_empty() {
            return Err(AuthError::InvalidLoginData("password is required".to_owned()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
