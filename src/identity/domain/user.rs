//! Users and their roles.

use super::ParseRoleError;
use crate::ids::{ClientId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an authenticated user.
///
/// Managers are customer-success staff who can see every client; client
/// users are restricted to their own account. Managers are spelled `csm`
/// on the wire, with `manager` accepted as an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Customer-success manager (staff side).
    #[serde(rename = "csm", alias = "manager")]
    Manager,
    /// Customer-side user.
    #[serde(rename = "client")]
    Client,
}

impl Role {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "csm",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "csm" | "manager" => Ok(Self::Manager),
            "client" => Ok(Self::Client),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// An authenticated identity, immutable for the life of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: String,
    display_name: String,
    role: Role,
    client_id: Option<ClientId>,
}

impl User {
    /// Creates a user value.
    #[must_use]
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
        client_id: Option<ClientId>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
            role,
            client_id,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the associated client for client-side users.
    #[must_use]
    pub const fn client_id(&self) -> Option<&ClientId> {
        self.client_id.as_ref()
    }

    /// Returns `true` for customer-success managers.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    /// Returns `true` when the user is bound to the given client.
    #[must_use]
    pub fn owns(&self, client_id: &ClientId) -> bool {
        self.client_id.as_ref() == Some(client_id)
    }
}
