//! Persistence adapters for the storage port.
//!
//! - [`memory::InMemoryDashboardStore`]: Thread-safe in-memory storage for
//!   tests and the demo server

pub mod memory;
