//! HTTP API router.
//!
//! Each handler authenticates (where required), consults the
//! [`crate::access::AccessPolicy`], and only then touches the storage port.
//! Errors render as `{"error": "..."}` via [`ApiError`].

mod error;
mod extract;
pub mod routes;
mod state;

use std::future::Future;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;

pub use error::{ApiError, ApiResult};
pub use extract::{BearerToken, CurrentUser, authorization_header};
pub use state::AppState;

use routes::{
    activities, assessments, assignments, auth, clients, conversations, dashboard, gmail, health,
    messages, realtime, roi,
};

/// Builds the full router, including the realtime socket route.
#[must_use]
pub fn router(state: AppState) -> Router {
    let socket_path = state.config().realtime.path.clone();
    Router::new()
        .route("/api/health", get(health::check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/dashboard/metrics", get(dashboard::metrics))
        .route("/api/clients", get(clients::list).post(clients::create))
        .route("/api/clients/:id", get(clients::show))
        .route(
            "/api/conversations",
            get(conversations::list).post(conversations::create),
        )
        .route(
            "/api/conversations/:id/messages",
            get(conversations::messages),
        )
        .route("/api/messages", post(messages::create))
        .route("/api/tests", get(assessments::list).post(assessments::create))
        .route("/api/tests/:id", get(assessments::show))
        .route(
            "/api/test-assignments",
            get(assignments::list).post(assignments::create),
        )
        .route("/api/test-assignments/:id", patch(assignments::update))
        .route("/api/roi-metrics", get(roi::list).post(roi::create))
        .route(
            "/api/activities",
            get(activities::list).post(activities::create),
        )
        .route("/api/gmail/sync", post(gmail::sync))
        .route(&socket_path, get(realtime::upgrade))
        .with_state(state)
}

/// Serves the router on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
