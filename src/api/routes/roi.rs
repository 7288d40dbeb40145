//! ROI measurements. Public.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiResult, AppState};
use crate::ids::ClientId;
use crate::store::domain::{NewRoiMetric, RoiMetric};

/// Query string for [`list`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiQuery {
    /// Restrict to one client.
    pub client_id: Option<ClientId>,
}

/// `GET /api/roi-metrics?clientId=`
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<RoiQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<RoiMetric>>> {
    AccessPolicy::authorize(None, &Action::AccessRoiMetrics)?;
    let Query(query) = params?;
    Ok(Json(
        state
            .store()
            .list_roi_metrics(query.client_id.as_ref())
            .await?,
    ))
}

/// `POST /api/roi-metrics`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewRoiMetric>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RoiMetric>)> {
    AccessPolicy::authorize(None, &Action::AccessRoiMetrics)?;
    let Json(metric) = payload?;
    let created = state.store().create_roi_metric(metric).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
