use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;

pub mod connection;
pub mod messages;

use crate::{
    app_state::StatusBoard,
    events::{LinkEvent, LinkState},
};
use messages::StatusSnapshot;

// What happened to a single inbound text message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    Published,
    Ignored,
    Malformed,
    Dropped,
}

/// Owns the one connection to the status server and keeps the board current.
///
/// The lifecycle handlers are methods on the link itself, so they can only
/// ever act on the connection it opened. Once closed the link stays inert.
pub struct StatusLink {
    url: String,
    state: LinkState,
    board: StatusBoard,
    events: mpsc::Sender<LinkEvent>,
}

impl StatusLink {
    pub fn new(
        url: impl Into<String>,
        board: StatusBoard,
        events: mpsc::Sender<LinkEvent>,
    ) -> Self {
        StatusLink {
            url: url.into(),
            state: LinkState::Connecting,
            board,
            events,
        }
    }

    /// Connects, serves the connection until it ends, and returns the final state.
    ///
    /// Connect failures and transport errors are logged and then handled the
    /// same way as a normal close. Nothing is retried.
    pub async fn run(mut self) -> LinkState {
        info!("Connecting to {}...", self.url);
        let connected = connect_async(self.url.as_str()).await;
        match connected {
            Ok((ws, _response)) => {
                if let Err(e) = connection::drive(ws, &mut self).await {
                    error!("Connection to {} failed: {}", self.url, e);
                }
            }
            Err(e) => error!("Failed to connect to {}: {}", self.url, e),
        }
        self.on_close().await;
        self.state
    }

    /// Marks the link open. Called once the subscription request has been sent.
    pub async fn on_open(&mut self) {
        debug_assert!(self.state.is_connecting(), "opened twice");
        info!("Socket opened");
        self.state = LinkState::Open;
        self.board.set_connected(true);
        self.notify(LinkEvent::Opened { url: self.url.clone() }).await;
    }

    pub async fn on_message(&mut self, text: &str) -> MessageOutcome {
        if !self.state.is_open() {
            warn!("Dropping message received while {}", self.state);
            return MessageOutcome::Dropped;
        }
        self.board.record_received();

        match StatusSnapshot::parse(text) {
            Ok(Some(snapshot)) => {
                debug!("Status update: {}", snapshot);
                self.board.publish(snapshot.clone());
                self.notify(LinkEvent::SnapshotUpdated(snapshot)).await;
                MessageOutcome::Published
            }
            Ok(None) => {
                debug!("Ignoring message without a status field");
                self.board.record_ignored();
                MessageOutcome::Ignored
            }
            Err(err) => {
                warn!("Discarding malformed message: {}", err);
                self.board.record_malformed();
                MessageOutcome::Malformed
            }
        }
    }

    /// Returns whether this call reported the close. The notice and the
    /// `Closed` event share this guard, so each happens once per link.
    pub async fn on_close(&mut self) -> bool {
        if self.state.is_closed() {
            return false;
        }
        self.state = LinkState::Closed;
        self.board.set_connected(false);
        info!("Socket disconnected");
        self.notify(LinkEvent::Closed).await;
        true
    }

    async fn notify(&self, event: LinkEvent) {
        if self.events.send(event).await.is_err() {
            debug!("No listener for link events");
        }
    }
}
