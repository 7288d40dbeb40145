//! Client records.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiError, ApiResult, AppState, CurrentUser};
use crate::ids::ClientId;
use crate::store::domain::{Client, NewClient};

/// `GET /api/clients`
///
/// Managers see every client. Client-role users see at most their own
/// client, or nothing when they are not bound to one.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Client>>> {
    if AccessPolicy::evaluate(Some(&user), &Action::ListAllClients).is_allowed() {
        return Ok(Json(state.store().list_clients(None).await?));
    }
    let Some(own) = user.client_id() else {
        return Ok(Json(Vec::new()));
    };
    AccessPolicy::authorize(Some(&user), &Action::ViewClient(own))?;
    let client = state.store().find_client(own).await?;
    Ok(Json(client.into_iter().collect()))
}

/// `POST /api/clients`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewClient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    AccessPolicy::authorize(Some(&user), &Action::CreateClient)?;
    let Json(client) = payload?;
    let created = state.store().create_client(client).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/clients/:id`
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<ClientId>,
) -> ApiResult<Json<Client>> {
    AccessPolicy::authorize(Some(&user), &Action::ViewClient(&id))?;
    state
        .store()
        .find_client(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Client"))
}
