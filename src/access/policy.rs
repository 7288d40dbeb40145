//! Role and ownership rules.

use super::Action;
use crate::identity::domain::{Role, User};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Why an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The action needs an authenticated caller.
    Unauthenticated,
    /// The caller's role may not perform the action at all.
    RoleNotPermitted,
    /// The caller may perform the action, but not on this resource.
    NotResourceOwner,
    /// A client-role caller has no client to own anything.
    NoAssociatedClient,
}

impl DenyReason {
    /// Returns a stable name for logs and tests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::RoleNotPermitted => "role_not_permitted",
            Self::NotResourceOwner => "not_resource_owner",
            Self::NoAssociatedClient => "no_associated_client",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The action may proceed.
    Allow,
    /// The action is refused.
    Deny(DenyReason),
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A refused action, surfaced to HTTP callers as `403`.
///
/// [`DenyReason::Unauthenticated`] is surfaced as `401` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{action} denied: {reason}")]
pub struct AccessDenied {
    /// Name of the refused action.
    pub action: &'static str,
    /// Why it was refused.
    pub reason: DenyReason,
}

impl AccessDenied {
    /// Returns the message shown to callers.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self.reason {
            DenyReason::Unauthenticated => "Unauthorized",
            DenyReason::RoleNotPermitted => "Your role may not perform this action",
            DenyReason::NotResourceOwner => "Can only access your own client data",
            DenyReason::NoAssociatedClient => "Client user has no associated client",
        }
    }
}

/// Stateless authorization policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decides whether `user` may perform `action`.
    #[must_use]
    pub fn evaluate(user: Option<&User>, action: &Action<'_>) -> Decision {
        let Some(user) = user else {
            return if action.requires_authentication() {
                Decision::Deny(DenyReason::Unauthenticated)
            } else {
                Decision::Allow
            };
        };
        match user.role() {
            Role::Manager => Decision::Allow,
            Role::Client => Self::evaluate_client(user, action),
        }
    }

    fn evaluate_client(user: &User, action: &Action<'_>) -> Decision {
        if action.manager_only() {
            return Decision::Deny(DenyReason::RoleNotPermitted);
        }
        let Some(owner) = action.owner() else {
            return Decision::Allow;
        };
        match user.client_id() {
            None => Decision::Deny(DenyReason::NoAssociatedClient),
            Some(own) if own == owner => Decision::Allow,
            Some(_) => Decision::Deny(DenyReason::NotResourceOwner),
        }
    }

    /// Evaluates and converts a denial into an error, logging it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when the policy refuses the action.
    pub fn authorize(user: Option<&User>, action: &Action<'_>) -> Result<(), AccessDenied> {
        match Self::evaluate(user, action) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                warn!(
                    action = action.name(),
                    reason = reason.as_str(),
                    user_id = user.map(|u| u.id().as_str()),
                    "access denied"
                );
                Err(AccessDenied {
                    action: action.name(),
                    reason,
                })
            }
        }
    }
}
