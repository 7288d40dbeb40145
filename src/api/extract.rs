//! Request extractors for authentication.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use super::{ApiError, AppState};
use crate::identity::{
    domain::{AuthError, SessionToken, User},
    services::SessionAuthenticator,
};

/// Reads the `Authorization` header as text.
///
/// A header that is not valid UTF-8 counts as malformed.
///
/// # Errors
///
/// Returns [`AuthError::MalformedHeader`] for a non-text header.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedHeader))
        .transpose()
}

/// The authenticated caller. Rejects with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(&parts.headers)?;
        let user = state.authenticator().authenticate(header).await?;
        Ok(Self(user))
    }
}

/// A syntactically valid bearer token, not yet checked against storage.
#[derive(Debug, Clone)]
pub struct BearerToken(pub SessionToken);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = authorization_header(&parts.headers)?;
        Ok(Self(SessionAuthenticator::bearer_token(header)?))
    }
}
