//! Login, logout, and current-user routes.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;

use crate::api::{ApiResult, AppState, BearerToken, CurrentUser};
use crate::identity::domain::{AuthError, Credentials, LoginGrant, User};

/// Body returned by a successful logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Confirmation text.
    pub message: &'static str,
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<LoginGrant>> {
    let Json(credentials) =
        payload.map_err(|_| AuthError::InvalidLoginData("malformed body".to_owned()))?;
    let grant = state.authenticator().login(&credentials).await?;
    Ok(Json(grant))
}

/// `POST /api/auth/logout`
///
/// Succeeds for any well-formed bearer token, live or not.
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<LogoutResponse>> {
    state.authenticator().logout(&token).await?;
    Ok(Json(LogoutResponse {
        message: "Logged out successfully",
    }))
}

/// `GET /api/auth/me`
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}
