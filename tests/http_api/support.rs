//! Server harness shared by the HTTP tests.

use std::sync::Arc;
use std::time::Duration;

use eyre::{Result, eyre};
use futures::{SinkExt, StreamExt};
use mockable::DefaultClock;
use pulseboard::{
    api::{self, AppState},
    config::ServerConfig,
    demo::{self, DEMO_PASSWORD},
};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use tokio::{
    net::{TcpListener, TcpStream},
    task::JoinHandle,
    time::timeout,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message as Frame};

/// Longest wait for a single realtime frame.
pub const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// Client side of a realtime socket.
pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A server bound to an ephemeral port; aborted on drop.
pub struct TestServer {
    base: String,
    client: Client,
    state: AppState,
    handle: JoinHandle<std::io::Result<()>>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    /// Boots the demo dataset with the default configuration.
    pub async fn start() -> Result<Self> {
        Self::start_with(ServerConfig::default()).await
    }

    /// Boots the demo dataset with `config`.
    pub async fn start_with(config: ServerConfig) -> Result<Self> {
        let data = demo::seed(&DefaultClock);
        let state = AppState::new(
            Arc::new(data.store),
            Arc::new(data.sessions),
            Arc::new(DefaultClock),
            config,
        )?;
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base = format!("http://{}", listener.local_addr()?);
        let handle = tokio::spawn(api::serve(
            listener,
            state.clone(),
            std::future::pending::<()>(),
        ));
        Ok(Self {
            base,
            client: Client::new(),
            state,
            handle,
        })
    }

    /// Returns the `ws://` URL of the realtime socket.
    pub fn socket_url(&self) -> String {
        let path = &self.state.config().realtime.path;
        format!("{}{path}", self.base.replacen("http", "ws", 1))
    }

    /// Number of connections the server currently holds.
    pub fn live_connections(&self) -> usize {
        self.state.channel().registry().len()
    }

    /// Builds a request to `path` with the given method.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{path}", self.base))
    }

    /// Builds an unauthenticated GET.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    /// Builds an unauthenticated POST.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(reqwest::Method::POST, path)
    }

    /// Logs in a demo account and returns its bearer token.
    pub async fn login(&self, username: &str) -> Result<String> {
        let body: Value = self
            .post("/api/auth/login")
            .json(&json!({ "username": username, "password": DEMO_PASSWORD }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body["token"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| eyre::eyre!("login response carried no token"))
    }
}

/// Adds a bearer header.
pub fn bearer(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header("Authorization", format!("Bearer {token}"))
}

/// Reads the `error` message of a failed response.
pub async fn error_message(response: Response) -> Result<String> {
    let body: Value = response.json().await?;
    body["error"]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| eyre::eyre!("error body carried no message: {body}"))
}

/// Sends a JSON event as a text frame.
pub async fn send_event(socket: &mut Socket, event: &Value) -> Result<()> {
    socket.send(Frame::Text(event.to_string())).await?;
    Ok(())
}

/// Waits for the next text frame and decodes it.
pub async fn next_event(socket: &mut Socket) -> Result<Value> {
    loop {
        let frame = timeout(FRAME_TIMEOUT, socket.next())
            .await?
            .ok_or_else(|| eyre!("socket closed while waiting for an event"))??;
        match frame {
            Frame::Text(text) => return Ok(serde_json::from_str(&text)?),
            Frame::Ping(_) | Frame::Pong(_) => {}
            other => return Err(eyre!("unexpected frame: {other:?}")),
        }
    }
}
