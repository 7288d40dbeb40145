//! Route handlers, one module per resource.

pub mod activities;
pub mod assessments;
pub mod assignments;
pub mod auth;
pub mod clients;
pub mod conversations;
pub mod dashboard;
pub mod gmail;
pub mod health;
pub mod messages;
pub mod realtime;
pub mod roi;
