//! Pulseboard: customer-success dashboard service.
//!
//! This crate serves client, ROI, and assessment metrics over a REST API and
//! runs a realtime channel that carries a keyword-driven data assistant and
//! live conversation messages.
//!
//! # Architecture
//!
//! Pulseboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure record and identity types with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for storage and sessions
//! - **Adapters**: Concrete implementations of ports (in-memory, HTTP, sockets)
//!
//! # Modules
//!
//! - [`store`]: The storage port and its records
//! - [`identity`]: Users, sessions, and bearer-token authentication
//! - [`access`]: Role and ownership authorization policy
//! - [`assistant`]: Keyword intent matching over live metrics
//! - [`realtime`]: WebSocket connection registry, dispatch, and broadcast
//! - [`api`]: The HTTP router and its error mapping

pub mod access;
pub mod api;
pub mod assistant;
pub mod config;
pub mod demo;
pub mod identity;
pub mod ids;
pub mod realtime;
pub mod store;
pub mod telemetry;

#[cfg(test)]
mod test_support;
