//! Issued tickets and the sinks that persist them.

use crate::graph::Path;
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// An immutable record of one purchased trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: String,
    pub start_station: String,
    pub end_station: String,
    pub price: u64,
    pub path: Path,
    /// Travel instructions, one numbered step per line.
    pub instructions: String,
    pub issued_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a ticket with a fresh random identifier.
    pub fn issue(
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        price: u64,
        path: Path,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            ticket_id: Uuid::new_v4().to_string(),
            start_station: start_station.into(),
            end_station: end_station.into(),
            price,
            path,
            instructions: instructions.into(),
            issued_at: Utc::now(),
        }
    }

    /// First eight characters of the id, for display.
    pub fn short_id(&self) -> &str {
        short_id(&self.ticket_id)
    }

    /// Number of hops travelled.
    pub fn stops(&self) -> usize {
        self.path.hops()
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// A ticket as read back from a log.
///
/// Entries written by older tools may carry a path that no longer decodes or no
/// issue time. Those parts are `None`; the rest of the entry is still listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedTicket {
    pub ticket_id: String,
    pub start_station: String,
    pub end_station: String,
    pub price: u64,
    pub path: Option<Path>,
    pub instructions: String,
    pub issued_at: Option<DateTime<Utc>>,
}

impl LoggedTicket {
    pub fn short_id(&self) -> &str {
        short_id(&self.ticket_id)
    }

    /// Hops travelled, when the stored path is readable.
    pub fn stops(&self) -> Option<usize> {
        self.path.as_ref().map(Path::hops)
    }
}

impl From<Ticket> for LoggedTicket {
    fn from(ticket: Ticket) -> Self {
        Self {
            ticket_id: ticket.ticket_id,
            start_station: ticket.start_station,
            end_station: ticket.end_station,
            price: ticket.price,
            path: Some(ticket.path),
            instructions: ticket.instructions,
            issued_at: Some(ticket.issued_at),
        }
    }
}

/// Append-only destination for issued tickets.
///
/// `append` takes `&self`; implementations must serialize concurrent appends.
pub trait TicketSink {
    fn append(&self, ticket: &Ticket) -> Result<()>;
}

/// Keeps tickets in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryTicketSink {
    tickets: Mutex<Vec<Ticket>>,
}

impl MemoryTicketSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every ticket appended so far, in order.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.tickets
            .lock()
            .map(|tickets| tickets.clone())
            .unwrap_or_default()
    }
}

impl TicketSink for MemoryTicketSink {
    fn append(&self, ticket: &Ticket) -> Result<()> {
        self.tickets
            .lock()
            .map_err(|_| anyhow!("ticket sink lock poisoned"))?
            .push(ticket.clone());
        Ok(())
    }
}
