//! Test assignments.
//!
//! Any authenticated caller may list, create, or update any assignment;
//! no ownership rule applies here.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiError, ApiResult, AppState, CurrentUser};
use crate::ids::{AssignmentId, ClientId, TestId};
use crate::store::domain::{
    AssignmentFilter, NewTestAssignment, TestAssignment, TestAssignmentPatch,
};

/// Query string for [`list`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentQuery {
    /// Restrict to one client.
    pub client_id: Option<ClientId>,
    /// Restrict to one test.
    pub test_id: Option<TestId>,
}

impl From<AssignmentQuery> for AssignmentFilter {
    fn from(query: AssignmentQuery) -> Self {
        Self {
            client_id: query.client_id,
            test_id: query.test_id,
        }
    }
}

/// `GET /api/test-assignments?clientId=&testId=`
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    params: Result<Query<AssignmentQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TestAssignment>>> {
    AccessPolicy::authorize(Some(&user), &Action::ManageTestAssignments)?;
    let Query(query) = params?;
    let filter = AssignmentFilter::from(query);
    Ok(Json(state.store().list_test_assignments(&filter).await?))
}

/// `POST /api/test-assignments`
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<NewTestAssignment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TestAssignment>)> {
    AccessPolicy::authorize(Some(&user), &Action::ManageTestAssignments)?;
    let Json(assignment) = payload?;
    let created = state.store().create_test_assignment(assignment).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /api/test-assignments/:id`
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<AssignmentId>,
    payload: Result<Json<TestAssignmentPatch>, JsonRejection>,
) -> ApiResult<Json<TestAssignment>> {
    AccessPolicy::authorize(Some(&user), &Action::ManageTestAssignments)?;
    let Json(patch) = payload?;
    state
        .store()
        .update_test_assignment(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Test assignment"))
}
