//! Authorization policy: which user may perform which action.
//!
//! Managers may do everything. Client-role users are confined to resources
//! owned by their own client and are refused manager-only actions. A few
//! read surfaces are public and allow anonymous callers.

mod action;
mod policy;

pub use action::Action;
pub use policy::{AccessDenied, AccessPolicy, Decision, DenyReason};

#[cfg(test)]
mod tests;
