//! Runs the Pulseboard server over the demo dataset.
//!
//! Usage:
//!
//! ```text
//! pulseboard [--bind 127.0.0.1:5000] [--fault-policy log-and-drop|disconnect]
//!            [--handshake-auth open|require-bearer]
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use pulseboard::{
    api::{self, AppState},
    config::{
        ConfigError, DEFAULT_MANAGER_ID, DEFAULT_PORT, DEFAULT_SESSION_TTL_HOURS,
        FrameFaultPolicy, HandshakeAuth, ServerConfig, session_ttl_from_hours,
    },
    demo, telemetry,
    ids::UserId,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Parser)]
#[command(name = "pulseboard")]
#[command(about = "Customer-success dashboard API and realtime channel", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value_t = SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))]
    bind: SocketAddr,

    /// Manager used when a request names none.
    #[arg(long, default_value = DEFAULT_MANAGER_ID)]
    default_manager: String,

    /// Session lifetime in hours.
    #[arg(long, default_value_t = DEFAULT_SESSION_TTL_HOURS)]
    session_ttl_hours: i64,

    /// What to do with unparseable realtime frames.
    #[arg(long, value_enum, default_value_t = FrameFaultPolicy::LogAndDrop)]
    fault_policy: FrameFaultPolicy,

    /// Whether the realtime handshake must authenticate.
    #[arg(long, value_enum, default_value_t = HandshakeAuth::Open)]
    handshake_auth: HandshakeAuth,

    /// Log filter directive; overrides `RUST_LOG`.
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let session_ttl = session_ttl_from_hours(self.session_ttl_hours)?;
        Ok(ServerConfig::default()
            .with_bind(self.bind)
            .with_default_manager(UserId::new(self.default_manager))
            .with_session_ttl(session_ttl)
            .with_fault_policy(self.fault_policy)
            .with_handshake_auth(self.handshake_auth))
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    telemetry::init(cli.log.as_deref())?;
    let config = cli.into_config()?;

    let clock = Arc::new(DefaultClock);
    let data = demo::seed(clock.as_ref());
    let bind = config.bind;
    let socket_path = config.realtime.path.clone();
    let state = AppState::new(
        Arc::new(data.store),
        Arc::new(data.sessions),
        clock,
        config,
    )?;

    let listener = TcpListener::bind(bind).await?;
    info!(address = %listener.local_addr()?, socket_path = %socket_path, "pulseboard listening");
    api::serve(listener, state, shutdown_signal()).await?;
    info!("pulseboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for ctrl-c; shutting down");
    }
}
