pub mod bridge;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod state;

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};
use vine_shared::constants::APP_NAME;

use crate::bridge::{event_loop, host_players, read_stdin, StdoutSink};
use crate::config::ClientConfig;
use crate::events::EventSink;
use crate::state::AppState;

pub async fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("vine_client_lib=debug,vine_store=info,vine_media=info,warn")
    });

    // stdout carries the event stream, so logs go to stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting {} client v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let config = ClientConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    let events: Arc<dyn EventSink> = Arc::new(StdoutSink);
    let buffer = config.event_buffer;
    let state = AppState::bootstrap(config, events.clone(), host_players(events))?;
    let state = Arc::new(Mutex::new(state));

    let (tx, rx) = mpsc::channel(buffer);
    tokio::spawn(read_stdin(tx));

    event_loop(state, rx).await;
    Ok(())
}
