//! HTTP error mapping.
//!
//! Every failure leaves the router as `{"error": "<message>"}` with one of
//! five statuses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::access::{AccessDenied, DenyReason};
use crate::assistant::AssistantError;
use crate::identity::domain::AuthError;
use crate::store::StoreError;

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error surfaced to HTTP callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Missing, malformed, unknown, or expired credentials (401).
    #[error("{0}")]
    Unauthorized(String),
    /// Role or ownership denial (403).
    #[error("{0}")]
    Forbidden(String),
    /// Malformed or invalid request data (400).
    #[error("{0}")]
    BadRequest(String),
    /// Missing resource (404).
    #[error("{0}")]
    NotFound(String),
    /// Unexpected failure (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Creates a not-found error for a named resource.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self::NotFound(format!("{resource} not found"))
    }

    /// Returns the HTTP status for the error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::MalformedHeader => {
                Self::Unauthorized("Unauthorized".to_owned())
            }
            AuthError::UnknownSession | AuthError::SessionExpired => {
                Self::Unauthorized("Invalid or expired token".to_owned())
            }
            AuthError::InvalidCredentials => {
                Self::Unauthorized("Invalid username or password".to_owned())
            }
            AuthError::InvalidLoginData(_) => Self::BadRequest("Invalid login data".to_owned()),
            AuthError::SessionLifetimeOverflow { ttl } => {
                error!(%ttl, "session lifetime overflows the clock");
                Self::Internal("Could not issue session".to_owned())
            }
            AuthError::Store(source) => {
                error!(error = %source, "session store failed");
                Self::Internal("Session store unavailable".to_owned())
            }
        }
    }
}

impl From<AccessDenied> for ApiError {
    fn from(denied: AccessDenied) -> Self {
        match denied.reason {
            DenyReason::Unauthenticated => Self::Unauthorized(denied.public_message().to_owned()),
            _ => Self::Forbidden(denied.public_message().to_owned()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(_) | StoreError::MissingReference { .. } => {
                Self::BadRequest(err.to_string())
            }
            StoreError::Persistence(_) => {
                error!(error = %err, "storage call failed");
                Self::Internal("Storage failure".to_owned())
            }
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        error!(error = %err, "assistant failed");
        Self::Internal("Assistant failure".to_owned())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
