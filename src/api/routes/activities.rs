//! Activity feed. Public.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiResult, AppState};
use crate::ids::ClientId;
use crate::store::domain::{Activity, NewActivity};

/// Page size when `limit` is omitted.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

/// Query string for [`list`]. A non-numeric `limit` is rejected with 400.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    /// Restrict to one client.
    pub client_id: Option<ClientId>,
    /// Maximum number of entries, most recent first.
    pub limit: Option<usize>,
}

/// `GET /api/activities?clientId=&limit=`
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ActivityQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Activity>>> {
    AccessPolicy::authorize(None, &Action::AccessActivities)?;
    let Query(query) = params?;
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    Ok(Json(
        state
            .store()
            .list_activities(query.client_id.as_ref(), limit)
            .await?,
    ))
}

/// `POST /api/activities`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewActivity>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Activity>)> {
    AccessPolicy::authorize(None, &Action::AccessActivities)?;
    let Json(activity) = payload?;
    let created = state.store().create_activity(activity).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
