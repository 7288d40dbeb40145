//! Assessment tests.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiError, ApiResult, AppState, CurrentUser};
use crate::ids::{TestId, UserId};
use crate::store::domain::{NewTest, Test};

/// Query string for [`list`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQuery {
    /// Restrict to tests authored by one manager.
    pub created_by: Option<UserId>,
}

/// `GET /api/tests?createdBy=`
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    params: Result<Query<TestQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Test>>> {
    AccessPolicy::authorize(Some(&user), &Action::ListTests)?;
    let Query(query) = params?;
    Ok(Json(
        state.store().list_tests(query.created_by.as_ref()).await?,
    ))
}

/// `POST /api/tests`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewTest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Test>)> {
    AccessPolicy::authorize(Some(&user), &Action::CreateTest)?;
    let Json(test) = payload?;
    let created = state.store().create_test(test).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/tests/:id`, readable without a token.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<TestId>,
) -> ApiResult<Json<Test>> {
    AccessPolicy::authorize(None, &Action::ViewTest)?;
    state
        .store()
        .find_test(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Test"))
}
