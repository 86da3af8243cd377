//! Numbered text menu over any line-based input, used by `metro menu`.

use crate::Network;
use crate::render;
use anyhow::Result;
use metro_nav::booking::PurchaseError;
use metro_nav::export::{ExportFormat, export};
use std::io::{BufRead, Write};

const BANNER: &str = "==============================================";

/// Read one trimmed line after printing `label`. `None` on end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn purchase(network: &Network, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let Some(start) = prompt(input, out, "\nEnter Start Station Name: ")? else {
        return Ok(());
    };
    let Some(end) = prompt(input, out, "Enter End Station Name: ")? else {
        return Ok(());
    };

    match network.service().purchase(&start, &end) {
        Ok(ticket) => render::receipt(out, &ticket, network.currency())?,
        Err(PurchaseError::UnknownStation(_)) => writeln!(
            out,
            "\nInvalid station name. Please check the list and try again."
        )?,
        Err(PurchaseError::SameStation(_)) => writeln!(
            out,
            "\nStart and End stations are the same. Price is {}0.",
            network.currency()
        )?,
        Err(PurchaseError::NoRoute { from, to }) => {
            writeln!(out, "\nNo route found between {from} and {to}.")?;
        }
        Err(e @ PurchaseError::Persist(_)) => {
            writeln!(out, "\nError: {:#}", anyhow::Error::new(e))?;
        }
    }
    Ok(())
}

fn show_tickets(network: &Network, out: &mut impl Write) -> Result<()> {
    match network.tickets.load_all() {
        Ok(tickets) => render::ticket_log(out, &tickets, network.currency())?,
        Err(e) => writeln!(out, "Error loading tickets: {e:#}")?,
    }
    Ok(())
}

fn show_map(network: &Network, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\nGenerating Metro Map (Graphviz DOT)...")?;
    write!(
        out,
        "{}",
        export(&network.graph, &network.directory, ExportFormat::Dot)
    )?;
    writeln!(out, "Render with: dot -Tpng -o metro.png")?;
    Ok(())
}

/// Run the menu loop until the user picks exit or input ends.
pub fn run(network: &Network, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    loop {
        writeln!(out, "\n{BANNER}")?;
        writeln!(out, "         Metro Ticket Purchasing System         ")?;
        writeln!(out, "{BANNER}")?;
        writeln!(out, "1. See all Metro Stations")?;
        writeln!(out, "2. Purchase a Ticket")?;
        writeln!(out, "3. See Purchased Tickets")?;
        writeln!(out, "4. Show Network Map")?;
        writeln!(out, "5. Exit")?;
        writeln!(out, "----------------------------------------------")?;

        let Some(choice) = prompt(input, out, "Enter your choice (1-5): ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => render::stations(out, &network.directory)?,
            "2" => purchase(network, input, out)?,
            "3" => show_tickets(network, out)?,
            "4" => show_map(network, out)?,
            "5" => {
                writeln!(out, "Thank you for using the Metro System. Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(out, "Invalid choice. Please enter a number between 1 and 5.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metro_core::config::MetroConfig;
    use metro_core::directory::{Directory, Line, Station};
    use metro_core::graph::NetworkGraph;
    use metro_core::storage::CsvTicketStore;
    use std::io::Cursor;

    fn make_network(dir: &std::path::Path) -> Network {
        let directory = Directory::new(
            vec![
                Station::new("1", "A", ["L1"]),
                Station::new("2", "B", ["L1"]),
                Station::new("3", "C", ["L1", "L2"]),
                Station::new("4", "D", ["L2"]),
                Station::new("5", "Island", Vec::<String>::new()),
            ],
            vec![
                Line::new("1", "L1", ["A", "B", "C"]),
                Line::new("2", "L2", ["C", "D"]),
            ],
        )
        .unwrap();
        let graph = NetworkGraph::build(&directory);
        Network {
            config: MetroConfig::default(),
            directory,
            graph,
            tickets: CsvTicketStore::new(dir.join("tickets.csv")),
        }
    }

    fn drive(network: &Network, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run(network, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_purchase_then_list() {
        let tmp = tempfile::tempdir().unwrap();
        let network = make_network(tmp.path());

        let text = drive(&network, "2\nA\nD\n3\n5\n");
        assert!(text.contains("--- TICKET PURCHASED (ID: "));
        assert!(text.contains("Route: A -> D"));
        assert!(text.contains("Stops: 3"));
        assert!(text.contains("Price: Rs 30"));
        assert!(text.contains("2. Change to L2 at C."));
        assert!(text.contains("--- PURCHASED TICKETS ---"));
        assert!(text.contains("Goodbye!"));
        assert_eq!(network.tickets.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_rejections_issue_no_ticket() {
        let tmp = tempfile::tempdir().unwrap();
        let network = make_network(tmp.path());

        let text = drive(&network, "2\nA\nNowhere\n2\nB\nB\n2\nA\nIsland\n5\n");
        assert!(text.contains("Invalid station name."));
        assert!(text.contains("Start and End stations are the same. Price is Rs0."));
        assert!(text.contains("No route found between A and Island."));
        assert!(network.tickets.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_stations_map_and_bad_choice() {
        let tmp = tempfile::tempdir().unwrap();
        let network = make_network(tmp.path());

        let text = drive(&network, "1\n4\n9\n3\n");
        assert!(text.contains("1. A (Lines: L1)"));
        assert!(text.contains("3. C (Lines: L1 | L2)"));
        assert!(text.contains("graph Metro {"));
        assert!(text.contains("Invalid choice. Please enter a number between 1 and 5."));
        assert!(text.contains("No tickets purchased yet."));
    }

    #[test]
    fn test_end_of_input_exits() {
        let tmp = tempfile::tempdir().unwrap();
        let network = make_network(tmp.path());

        let text = drive(&network, "2\nA\n");
        assert!(!text.contains("Goodbye!"));
        assert!(network.tickets.load_all().unwrap().is_empty());
    }
}
