//! The realtime socket end to end: frames in, JSON events out.

use std::time::Duration;

use eyre::{Result, eyre};
use futures::{SinkExt, StreamExt};
use pulseboard::config::{FrameFaultPolicy, HandshakeAuth, ServerConfig};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, Message as Frame, client::IntoClientRequest},
};

use super::support::{FRAME_TIMEOUT, Socket, TestServer, bearer, next_event, send_event};

/// Opens a socket and waits until the server has registered it.
///
/// A chat round trip proves registration: the reply is routed through the
/// connection registry.
async fn open_socket(server: &TestServer) -> Result<Socket> {
    let (mut socket, _) = connect_async(server.socket_url()).await?;
    send_event(&mut socket, &json!({ "type": "chat_message", "query": "hello" })).await?;
    let reply = next_event(&mut socket).await?;
    if reply["type"] != "chat_response" {
        return Err(eyre!("expected a chat_response, got {reply}"));
    }
    Ok(socket)
}

async fn wait_for_connections(server: &TestServer, expected: usize) -> Result<()> {
    timeout(FRAME_TIMEOUT, async {
        while server.live_connections() != expected {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await?;
    Ok(())
}

fn conversation_message(content: &str) -> Value {
    json!({
        "type": "conversation_message",
        "conversationId": "conv-1",
        "senderId": "client-user-1",
        "senderType": "user",
        "content": content
    })
}

#[tokio::test]
async fn conversation_message_reaches_every_socket() -> Result<()> {
    let server = TestServer::start().await?;
    let mut sender = open_socket(&server).await?;
    let mut watcher = open_socket(&server).await?;

    send_event(&mut sender, &conversation_message("Renewal signed")).await?;

    for socket in [&mut sender, &mut watcher] {
        let event = next_event(socket).await?;
        assert_eq!(event["type"], "new_message");
        assert_eq!(event["message"]["conversationId"], "conv-1");
        assert_eq!(event["message"]["content"], "Renewal signed");
    }

    let token = server.login("sarah").await?;
    let history: Vec<Value> = bearer(server.get("/api/conversations/conv-1/messages"), &token)
        .send()
        .await?
        .json()
        .await?;
    assert!(history.iter().any(|m| m["content"] == "Renewal signed"));
    Ok(())
}

#[tokio::test]
async fn chat_response_goes_only_to_the_asker() -> Result<()> {
    let server = TestServer::start().await?;
    let mut asker = open_socket(&server).await?;
    let mut bystander = open_socket(&server).await?;

    send_event(&mut asker, &json!({ "type": "chat_message", "query": "what's my ROI?" })).await?;

    let reply = next_event(&mut asker).await?;
    assert_eq!(reply["type"], "chat_response");
    assert!(reply["message"].as_str().is_some_and(|m| m.contains("ROI")));
    assert!(reply["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));
    assert!(
        timeout(Duration::from_millis(200), bystander.next())
            .await
            .is_err(),
        "bystander should receive nothing"
    );
    Ok(())
}

#[tokio::test]
async fn unparseable_frame_keeps_the_socket_open() -> Result<()> {
    let server = TestServer::start().await?;
    let mut socket = open_socket(&server).await?;

    socket.send(Frame::Text("{not json".to_owned())).await?;
    send_event(&mut socket, &json!({ "type": "mystery" })).await?;
    send_event(&mut socket, &conversation_message("still here")).await?;

    let event = next_event(&mut socket).await?;
    assert_eq!(event["type"], "new_message");
    assert_eq!(event["message"]["content"], "still here");
    assert_eq!(server.live_connections(), 1);
    Ok(())
}

#[tokio::test]
async fn disconnect_policy_closes_only_the_offender() -> Result<()> {
    let config = ServerConfig::default().with_fault_policy(FrameFaultPolicy::Disconnect);
    let server = TestServer::start_with(config).await?;
    let mut offender = open_socket(&server).await?;
    let mut survivor = open_socket(&server).await?;

    offender.send(Frame::Text("garbage".to_owned())).await?;

    let closed = matches!(
        timeout(FRAME_TIMEOUT, offender.next()).await?,
        None | Some(Ok(Frame::Close(_)) | Err(_))
    );
    assert!(closed, "offending socket should be closed");
    wait_for_connections(&server, 1).await?;

    send_event(&mut survivor, &conversation_message("after the fault")).await?;
    let event = next_event(&mut survivor).await?;
    assert_eq!(event["message"]["content"], "after the fault");
    Ok(())
}

#[tokio::test]
async fn closing_a_socket_unregisters_it() -> Result<()> {
    let server = TestServer::start().await?;
    let mut socket = open_socket(&server).await?;
    assert_eq!(server.live_connections(), 1);

    socket.close(None).await?;

    wait_for_connections(&server, 0).await?;
    Ok(())
}

#[tokio::test]
async fn bearer_handshake_rejects_anonymous_upgrades() -> Result<()> {
    let config = ServerConfig::default().with_handshake_auth(HandshakeAuth::RequireBearer);
    let server = TestServer::start_with(config).await?;

    match connect_async(server.socket_url()).await {
        Err(WsError::Http(response)) => {
            assert_eq!(response.status().as_u16(), StatusCode::UNAUTHORIZED.as_u16());
        }
        Err(other) => return Err(eyre!("unexpected handshake failure: {other}")),
        Ok(_) => return Err(eyre!("anonymous upgrade should be refused")),
    }

    let token = server.login("acme").await?;
    let mut request = server.socket_url().into_client_request()?;
    request
        .headers_mut()
        .insert("Authorization", format!("Bearer {token}").parse()?);
    let (mut socket, _) = connect_async(request).await?;

    send_event(&mut socket, &conversation_message("authorized write")).await?;
    let event = next_event(&mut socket).await?;
    assert_eq!(event["message"]["content"], "authorized write");
    Ok(())
}
