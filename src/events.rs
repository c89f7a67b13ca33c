use strum::{Display, EnumIs};

use crate::link::messages::StatusSnapshot;

// Lifecycle of the one connection a link owns. Closed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIs)]
pub enum LinkState {
    Connecting,
    Open,
    Closed,
}

// Notifications sent from the link task to whoever renders status
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    Opened { url: String },
    SnapshotUpdated(StatusSnapshot),
    Closed,
}
