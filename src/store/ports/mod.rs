//! Port trait definitions for the storage subsystem.
//!
//! The persistence implementation behind this port is treated as a
//! black-box CRUD API. Adapters implement [`DashboardStore`] to connect the
//! service to a database or, for tests and demos, to memory.

mod dashboard;

pub use dashboard::DashboardStore;
