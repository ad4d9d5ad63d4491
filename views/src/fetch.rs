//! Load status and version tagging shared by the view containers.

use serde::Serialize;

/// What a view shows in place of (or alongside) its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum ViewStatus {
    Loading,
    Ready,
    /// User-visible error message
    Failed(String),
}

impl ViewStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewStatus::Ready)
    }
}

/// Version tag handed out when a view starts a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    version: u64,
}

impl Ticket {
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Issues tickets for one view and tells current responses from superseded ones.
#[derive(Debug, Default)]
pub struct FetchTracker {
    latest: u64,
    in_flight: bool,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new fetch; any earlier ticket becomes stale.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        self.in_flight = true;
        Ticket {
            version: self.latest,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.version == self.latest
    }

    /// Marks `ticket` finished. Returns `false` for a stale ticket, whose
    /// response must be dropped.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = false;
        true
    }
}
