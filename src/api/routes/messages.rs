//! Posting conversation messages over HTTP.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiError, ApiResult, AppState, CurrentUser};
use crate::store::{
    StoreError,
    domain::{Message, NewMessage},
};

/// `POST /api/messages`
///
/// Unlike the realtime channel, this route stores without broadcasting.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewMessage>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    let Json(message) = payload?;
    message.validate().map_err(StoreError::from)?;
    let conversation = state
        .store()
        .find_conversation(&message.conversation_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Conversation"))?;
    AccessPolicy::authorize(Some(&user), &Action::CreateMessage(&conversation.client_id))?;
    let created = state.store().create_message(message).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
