//! Aggregate dashboard metrics.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiResult, AppState, CurrentUser};
use crate::ids::UserId;
use crate::store::domain::DashboardMetrics;

/// Query string for [`metrics`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsQuery {
    /// Manager to aggregate for; defaults to the configured manager.
    pub csm_id: Option<UserId>,
}

/// `GET /api/dashboard/metrics?csmId=`
pub async fn metrics(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    params: Result<Query<MetricsQuery>, QueryRejection>,
) -> ApiResult<Json<DashboardMetrics>> {
    AccessPolicy::authorize(Some(&user), &Action::ViewDashboard)?;
    let Query(query) = params?;
    let csm_id = query
        .csm_id
        .filter(|id| !id.is_blank())
        .unwrap_or_else(|| state.config().default_manager_id.clone());
    Ok(Json(state.store().dashboard_metrics(&csm_id).await?))
}
