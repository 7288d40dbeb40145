//! Pumps frames between an upgraded WebSocket and the channel.

use std::sync::Arc;

use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures::{SinkExt, StreamExt};
use tracing::{debug, warn};

use super::{FrameOutcome, OutboundReceiver, RealtimeChannel};
use crate::identity::domain::User;

/// Serves one upgraded socket until the peer leaves or the channel asks to
/// close it.
///
/// A writer task drains the connection's outbound queue into the socket
/// while the read loop feeds inbound frames to the channel.
pub async fn serve_socket(socket: WebSocket, channel: Arc<RealtimeChannel>, user: Option<User>) {
    let (sink, mut stream) = socket.split();
    let (id, outbound) = channel.connect(user);
    let writer = tokio::spawn(write_outbound(sink, outbound));

    while let Some(frame) = stream.next().await {
        let outcome = match frame {
            Ok(WsMessage::Text(text)) => channel.handle_text(id, &text).await,
            Ok(WsMessage::Binary(_)) => channel.handle_binary(id),
            Ok(WsMessage::Close(_)) => break,
            Ok(WsMessage::Ping(_) | WsMessage::Pong(_)) => continue,
            Err(error) => {
                debug!(connection_id = %id, %error, "realtime socket errored");
                break;
            }
        };
        if outcome == FrameOutcome::Close {
            break;
        }
    }

    channel.disconnect(id);
    if let Err(error) = writer.await {
        warn!(connection_id = %id, %error, "realtime writer task failed");
    }
}

async fn write_outbound(
    mut sink: futures::stream::SplitSink<WebSocket, WsMessage>,
    mut outbound: OutboundReceiver,
) {
    while let Some(event) = outbound.recv().await {
        let frame = match event.to_frame() {
            Ok(frame) => frame,
            Err(error) => {
                warn!(%error, "skipping unencodable realtime event");
                continue;
            }
        };
        if sink.send(WsMessage::Text(frame)).await.is_err() {
            break;
        }
    }
    if let Err(error) = sink.close().await {
        debug!(%error, "realtime socket already closed");
    }
}
