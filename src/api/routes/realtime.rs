//! WebSocket upgrade for the realtime channel.

use std::sync::Arc;

use axum::{
    extract::{State, WebSocketUpgrade},
    http::HeaderMap,
    response::Response,
};

use crate::api::{ApiResult, AppState, authorization_header};
use crate::config::HandshakeAuth;
use crate::realtime::serve_socket;

/// Upgrades the request and hands the socket to the channel.
///
/// With [`HandshakeAuth::RequireBearer`] the upgrade is refused with 401
/// unless the request authenticates.
pub async fn upgrade(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let user = match state.config().realtime.handshake_auth {
        HandshakeAuth::Open => None,
        HandshakeAuth::RequireBearer => Some(
            state
                .authenticator()
                .authenticate(authorization_header(&headers)?)
                .await?,
        ),
    };
    let channel = Arc::clone(state.channel());
    Ok(ws.on_upgrade(move |socket| serve_socket(socket, channel, user)))
}
