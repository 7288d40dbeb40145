//! Error types for storage port operations.
//!
//! Uses `thiserror` for typed variants that callers (notably the HTTP error
//! mapping) can inspect.

use super::domain::RecordValidationError;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`super::ports::DashboardStore`] implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The inbound record failed validation.
    #[error(transparent)]
    Validation(#[from] RecordValidationError),

    /// The record references a parent that does not exist.
    #[error("{entity} not found: {id}")]
    MissingReference {
        /// Kind of the missing parent record.
        entity: &'static str,
        /// Identifier that failed to resolve.
        id: String,
    },

    /// A persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Creates a missing-reference error.
    #[must_use]
    pub fn missing(entity: &'static str, id: impl ToString) -> Self {
        Self::MissingReference {
            entity,
            id: id.to_string(),
        }
    }

    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for storage port operations.
pub type StoreResult<T> = Result<T, StoreError>;
