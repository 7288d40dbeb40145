//! Simulated mailbox import.

use axum::{Json, extract::State};
use chrono::SecondsFormat;
use rand::Rng;
use serde::Serialize;

use crate::access::{AccessPolicy, Action};
use crate::api::{ApiResult, AppState};

/// Result of a simulated sync.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    /// Always `true`; the stub never fails.
    pub success: bool,
    /// Pretend import count in `1..=10`.
    pub messages_imported: u32,
    /// When the sync ran, RFC 3339 UTC.
    pub timestamp: String,
}

/// `POST /api/gmail/sync`
///
/// Stands in for a real mailbox integration; nothing is stored.
pub async fn sync(State(state): State<AppState>) -> ApiResult<Json<SyncResult>> {
    AccessPolicy::authorize(None, &Action::SyncMailbox)?;
    let messages_imported = rand::thread_rng().gen_range(1..=10);
    Ok(Json(SyncResult {
        success: true,
        messages_imported,
        timestamp: state
            .clock()
            .utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
