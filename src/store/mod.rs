//! The storage port and the records that flow through it.
//!
//! # Architecture
//!
//! - **Domain**: Record and payload types ([`domain::Client`],
//!   [`domain::Message`], [`domain::TestAssignment`], etc.)
//! - **Ports**: The [`ports::DashboardStore`] trait
//! - **Adapters**: [`adapters::memory::InMemoryDashboardStore`]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::{StoreError, StoreResult};

#[cfg(test)]
mod tests;
