//! Conversations and their message history.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiError, ApiResult, AppState, CurrentUser};
use crate::ids::{ClientId, ConversationId, UserId};
use crate::store::{
    StoreError,
    domain::{Conversation, ConversationFilter, Message, NewConversation},
};

/// Query string for [`list`]. Honoured for managers only.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    /// Restrict to one client.
    pub client_id: Option<ClientId>,
    /// Restrict to one manager.
    pub csm_id: Option<UserId>,
}

/// `GET /api/conversations?clientId=&csmId=`
///
/// Client-role users always get their own client's conversations,
/// whatever the query says.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    params: Result<Query<ConversationQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Conversation>>> {
    let Query(query) = params?;
    let filter = if user.is_manager() {
        AccessPolicy::authorize(Some(&user), &Action::ListConversations(None))?;
        ConversationFilter {
            client_id: query.client_id,
            csm_id: query.csm_id,
        }
    } else {
        let Some(own) = user.client_id() else {
            return Ok(Json(Vec::new()));
        };
        AccessPolicy::authorize(Some(&user), &Action::ListConversations(Some(own)))?;
        ConversationFilter::for_client(own.clone())
    };
    Ok(Json(state.store().list_conversations(&filter).await?))
}

/// `POST /api/conversations`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewConversation>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Conversation>)> {
    let Json(conversation) = payload?;
    conversation.validate().map_err(StoreError::from)?;
    AccessPolicy::authorize(
        Some(&user),
        &Action::CreateConversation(&conversation.client_id),
    )?;
    let created = state.store().create_conversation(conversation).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/conversations/:id/messages`
pub async fn messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<ConversationId>,
) -> ApiResult<Json<Vec<Message>>> {
    let conversation = state
        .store()
        .find_conversation(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Conversation"))?;
    AccessPolicy::authorize(
        Some(&user),
        &Action::ViewConversation(&conversation.client_id),
    )?;
    Ok(Json(state.store().list_messages(&id).await?))
}
