//! Route quoting and ticket purchase.

use crate::itinerary::{self, Itinerary};
use crate::paths;
use metro_core::directory::Directory;
use metro_core::graph::{NetworkGraph, Path};
use metro_core::ticket::{Ticket, TicketSink};
use serde::Serialize;
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::info;

/// Reasons a quote or purchase is refused.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PurchaseError {
    #[error("unknown station: {0}")]
    UnknownStation(String),
    #[error("start and end station are both {0}; no ticket needed")]
    SameStation(String),
    #[error("no route found between {from} and {to}")]
    NoRoute { from: String, to: String },
    #[error("failed to record ticket")]
    Persist(#[source] Arc<dyn StdError + Send + Sync>),
}

/// A priced route, ready to be turned into a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub start: String,
    pub end: String,
    pub path: Path,
    pub itinerary: Itinerary,
    pub price: u64,
}

impl Quote {
    pub fn stops(&self) -> usize {
        self.path.hops()
    }
}

/// Prices routes and issues tickets into a sink.
pub struct TicketService<'a, S: TicketSink + ?Sized> {
    directory: &'a Directory,
    graph: &'a NetworkGraph,
    sink: &'a S,
    base_fare: u64,
}

impl<'a, S: TicketSink + ?Sized> TicketService<'a, S> {
    pub fn new(
        directory: &'a Directory,
        graph: &'a NetworkGraph,
        sink: &'a S,
        base_fare: u64,
    ) -> Self {
        Self {
            directory,
            graph,
            sink,
            base_fare,
        }
    }

    /// Validate both stations and price the fewest-hop route between them.
    pub fn quote(&self, start: &str, end: &str) -> Result<Quote, PurchaseError> {
        for name in [start, end] {
            if !self.directory.contains_station(name) {
                return Err(PurchaseError::UnknownStation(name.to_string()));
            }
        }
        if start == end {
            return Err(PurchaseError::SameStation(start.to_string()));
        }

        let path =
            paths::shortest_path(self.graph, start, end).ok_or_else(|| PurchaseError::NoRoute {
                from: start.to_string(),
                to: end.to_string(),
            })?;
        let itinerary = itinerary::instructions(&path, self.directory);
        let price = itinerary::fare(&path, self.base_fare);

        Ok(Quote {
            start: start.to_string(),
            end: end.to_string(),
            path,
            itinerary,
            price,
        })
    }

    /// Quote the route, issue a ticket for it, and hand the ticket to the sink.
    pub fn purchase(&self, start: &str, end: &str) -> Result<Ticket, PurchaseError> {
        let quote = self.quote(start, end)?;
        let ticket = Ticket::issue(
            quote.start,
            quote.end,
            quote.price,
            quote.path,
            quote.itinerary.to_string(),
        );

        self.sink
            .append(&ticket)
            .map_err(|err| {
                let source: Box<dyn StdError + Send + Sync> = err.into();
                PurchaseError::Persist(Arc::from(source))
            })?;

        info!(
            ticket = ticket.short_id(),
            from = %ticket.start_station,
            to = %ticket.end_station,
            price = ticket.price,
            "issued ticket"
        );
        Ok(ticket)
    }
}
