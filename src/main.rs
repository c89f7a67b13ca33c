mod app_state;
mod config;
mod events;
mod link;

use clap::Parser;
use log::{debug, error, info};
use std::process;
use tokio::sync::mpsc;

use app_state::StatusBoard;
use events::LinkEvent;
use link::StatusLink;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::Config::parse();
    if let Err(e) = config.validate() {
        eprintln!("Invalid status server address {}: {}", config.url, e);
        process::exit(1);
    }

    let board = StatusBoard::new();
    let (event_tx, event_rx) = mpsc::channel(usize::from(config.channel_capacity));
    let renderer = tokio::spawn(render_status(event_rx));

    // No reconnect: once the link closes the process is done
    let final_state = StatusLink::new(config.url.clone(), board.clone(), event_tx)
        .run()
        .await;

    if let Err(e) = renderer.await {
        error!("Status renderer failed: {}", e);
    }

    let state = board.state();
    info!(
        "Link {}: {} messages, {} status updates, {} ignored, {} malformed",
        final_state,
        state.messages_received,
        state.snapshots_published,
        state.messages_ignored,
        state.messages_malformed
    );
    match board.snapshot() {
        Some(snapshot) => info!("Last known status: {}", snapshot),
        None => info!("No status was received"),
    }
}

// Stands in for the status display: logs every event the link emits
async fn render_status(mut events: mpsc::Receiver<LinkEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            LinkEvent::Opened { url } => info!("Connected to {}", url),
            LinkEvent::SnapshotUpdated(snapshot) => {
                match snapshot.get("position") {
                    Some(position) => info!("Status: {} (position {})", snapshot, position),
                    None => info!("Status: {}", snapshot),
                }
                debug!("Full status payload: {}", snapshot.as_value());
            }
            LinkEvent::Closed => info!("Status display stopped updating"),
        }
    }
}
