//! Plain-text rendering shared by subcommands and the interactive menu.

use metro_core::directory::Directory;
use metro_core::ticket::{LoggedTicket, Ticket};
use metro_nav::booking::Quote;
use std::io::{self, Write};

const RULE: &str = "-------------------------------------------------";

/// Numbered station list with the lines serving each station.
pub fn stations(out: &mut impl Write, directory: &Directory) -> io::Result<()> {
    writeln!(out, "\n--- Available Metro Stations ---")?;
    for (i, station) in directory.stations().enumerate() {
        let lines: Vec<&str> = station.lines.iter().map(String::as_str).collect();
        writeln!(out, "{}. {} (Lines: {})", i + 1, station.name, lines.join(" | "))?;
    }
    writeln!(out, "--------------------------------")
}

/// Route, stop count, price and steps for a quoted trip.
pub fn quote(out: &mut impl Write, quote: &Quote, currency: &str) -> io::Result<()> {
    writeln!(out, "Route: {} -> {}", quote.start, quote.end)?;
    writeln!(out, "Path: {}", quote.path)?;
    writeln!(out, "Stops: {}", quote.stops())?;
    writeln!(out, "Price: {} {}", currency, quote.price)?;
    writeln!(out, "\nTravel Instructions:")?;
    writeln!(out, "{}", quote.itinerary)
}

/// Receipt printed right after a purchase.
pub fn receipt(out: &mut impl Write, ticket: &Ticket, currency: &str) -> io::Result<()> {
    writeln!(out, "\n--- TICKET PURCHASED (ID: {}...) ---", ticket.short_id())?;
    let (from, to) = (&ticket.start_station, &ticket.end_station);
    writeln!(out, "Route: {from} -> {to}")?;
    writeln!(out, "Stops: {}", ticket.stops())?;
    writeln!(out, "Price: {} {}", currency, ticket.price)?;
    writeln!(out, "\nTravel Instructions:")?;
    writeln!(out, "{}", ticket.instructions)?;
    writeln!(out, "{RULE}")
}

/// Compact listing of previously issued tickets. Unreadable paths show `N/A` stops.
pub fn ticket_log(
    out: &mut impl Write,
    tickets: &[LoggedTicket],
    currency: &str,
) -> io::Result<()> {
    if tickets.is_empty() {
        return writeln!(out, "\nNo tickets purchased yet.");
    }

    writeln!(out, "\n--- PURCHASED TICKETS ---")?;
    for ticket in tickets {
        let preview: String = ticket
            .instructions
            .replace('\n', " ")
            .chars()
            .take(50)
            .collect();
        let stops = ticket
            .stops()
            .map_or_else(|| "N/A".to_string(), |n| n.to_string());

        writeln!(out, "ID: {}...", ticket.short_id())?;
        let (from, to) = (&ticket.start_station, &ticket.end_station);
        writeln!(out, "  Route: {from} -> {to}")?;
        writeln!(out, "  Price: {} {} | Stops: {stops}", currency, ticket.price)?;
        if let Some(issued_at) = ticket.issued_at {
            writeln!(out, "  Issued: {}", issued_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        writeln!(out, "  Instructions: {preview}...")?;
        writeln!(out, "{}", "-".repeat(30))?;
    }
    writeln!(out, "-----------------------------")
}

#[cfg(test)]
mod tests {
    use super::*;
    use metro_core::directory::{Line, Station};
    use metro_core::graph::Path;

    #[test]
    fn test_station_listing() {
        let dir = Directory::new(
            vec![
                Station::new("1", "Harbor", ["Red"]),
                Station::new("2", "Central", ["Red", "Blue"]),
            ],
            vec![Line::new("1", "Red", ["Central", "Harbor"])],
        )
        .unwrap();
        let mut out = Vec::new();
        stations(&mut out, &dir).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1. Central (Lines: Blue | Red)"));
        assert!(text.contains("2. Harbor (Lines: Red)"));
    }

    #[test]
    fn test_ticket_log_truncates_instructions() {
        let ticket = Ticket::issue(
            "A",
            "B",
            10,
            Path::new(vec!["A".into(), "B".into()]),
            "1. Start on a very long line name indeed from A.\n2. Arrive at final destination B.",
        );
        let mut out = Vec::new();
        ticket_log(&mut out, &[LoggedTicket::from(ticket.clone())], "Rs").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("ID: {}...", ticket.short_id())));
        assert!(text.contains("Price: Rs 10 | Stops: 1"));
        assert!(
            text.contains("Instructions: 1. Start on a very long line name indeed from A. 2...")
        );
    }

    #[test]
    fn test_ticket_log_lists_entry_without_path() {
        let logged = LoggedTicket {
            ticket_id: "0f6c1a2b-legacy".into(),
            start_station: "Central".into(),
            end_station: "Harbor".into(),
            price: 10,
            path: None,
            instructions: "1. Start on Red from Central.".into(),
            issued_at: None,
        };
        let mut out = Vec::new();
        ticket_log(&mut out, &[logged], "Rs").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ID: 0f6c1a2b..."));
        assert!(text.contains("Route: Central -> Harbor"));
        assert!(text.contains("Price: Rs 10 | Stops: N/A"));
        assert!(!text.contains("Issued:"));
        assert!(!text.contains("No tickets purchased yet."));
    }

    #[test]
    fn test_empty_ticket_log() {
        let mut out = Vec::new();
        ticket_log(&mut out, &[], "Rs").unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No tickets purchased yet."));
    }
}
