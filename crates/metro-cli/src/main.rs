//! CLI binary for the metro network: list stations, plan routes, and buy tickets.

mod menu;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use metro_core::config::MetroConfig;
use metro_core::directory::Directory;
use metro_core::graph::NetworkGraph;
use metro_core::storage::{self, CsvTicketStore};
use metro_nav::booking::{PurchaseError, TicketService};
use metro_nav::export::ExportFormat;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "metro", about = "Metro route planner and ticket office")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every station with the lines serving it
    Stations,

    /// Show the fewest-stop route, fare, and instructions between two stations
    Route {
        /// Start station name
        from: String,

        /// End station name
        to: String,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Buy a ticket and append it to the ticket log
    Buy {
        /// Start station name
        from: String,

        /// End station name
        to: String,
    },

    /// List purchased tickets
    Tickets,

    /// Export the network map as DOT (Graphviz) or Mermaid flowchart
    Export {
        /// Output format: dot, mermaid
        #[arg(short, long, default_value = "dot")]
        format: String,
    },

    /// Show network statistics
    Info,

    /// Validate network integrity (unknown stations, missing memberships, isolated stations)
    Validate,

    /// Interactive text menu
    Menu,
}

/// Everything a command needs: configuration, the loaded network, and the ticket log.
pub(crate) struct Network {
    pub config: MetroConfig,
    pub directory: Directory,
    pub graph: NetworkGraph,
    pub tickets: CsvTicketStore,
}

impl Network {
    pub fn service(&self) -> TicketService<'_, CsvTicketStore> {
        TicketService::new(
            &self.directory,
            &self.graph,
            &self.tickets,
            self.config.fare.base_fare,
        )
    }

    pub fn currency(&self) -> &str {
        &self.config.fare.currency
    }
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn load_network(project_root: &Path) -> Result<Network> {
    let config = MetroConfig::load(project_root)?;
    let directory = storage::load_directory(project_root, &config.data)?;
    let graph = NetworkGraph::build(&directory);
    let tickets = CsvTicketStore::new(config.data.tickets_path(project_root));
    tracing::debug!(
        stations = directory.station_count(),
        lines = directory.line_count(),
        "network loaded"
    );
    Ok(Network {
        config,
        directory,
        graph,
        tickets,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let network = load_network(&project_root)?;

    match cli.command {
        Commands::Stations => cmd_stations(&network),
        Commands::Route { from, to, json } => cmd_route(&network, &from, &to, json),
        Commands::Buy { from, to } => cmd_buy(&network, &from, &to),
        Commands::Tickets => cmd_tickets(&network),
        Commands::Export { format } => cmd_export(&network, &format),
        Commands::Info => cmd_info(&network),
        Commands::Validate => cmd_validate(&network),
        Commands::Menu => {
            let stdin = io::stdin();
            menu::run(&network, &mut stdin.lock(), &mut io::stdout().lock())
        }
    }
}

fn cmd_stations(network: &Network) -> Result<()> {
    render::stations(&mut io::stdout().lock(), &network.directory)?;
    Ok(())
}

fn cmd_route(network: &Network, from: &str, to: &str, json: bool) -> Result<()> {
    let quote = network.service().quote(from, to)?;
    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&quote)?)?;
    } else {
        render::quote(&mut out, &quote, network.currency())?;
    }
    Ok(())
}

fn cmd_buy(network: &Network, from: &str, to: &str) -> Result<()> {
    match network.service().purchase(from, to) {
        Ok(ticket) => {
            render::receipt(&mut io::stdout().lock(), &ticket, network.currency())?;
            Ok(())
        }
        Err(PurchaseError::SameStation(_)) => {
            eprintln!(
                "Start and End stations are the same. Price is {}0.",
                network.currency()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_tickets(network: &Network) -> Result<()> {
    let tickets = network.tickets.load_all()?;
    render::ticket_log(&mut io::stdout().lock(), &tickets, network.currency())?;
    Ok(())
}

fn cmd_export(network: &Network, format: &str) -> Result<()> {
    let Some(export_format) = ExportFormat::from_name(format) else {
        anyhow::bail!("Unknown export format: {format}. Use 'dot' or 'mermaid'.");
    };

    let output = metro_nav::export::export(&network.graph, &network.directory, export_format);
    print!("{output}");

    Ok(())
}

fn cmd_info(network: &Network) -> Result<()> {
    let graph = &network.graph;
    let components = graph.components();

    println!("Stations: {}", network.directory.station_count());
    println!("Lines: {}", network.directory.line_count());
    println!("Graph nodes: {}", graph.station_count());
    println!("Connections: {}", graph.edge_count());
    println!("Connected components: {}", components.len());
    println!(
        "Base fare: {} {}",
        network.currency(),
        network.config.fare.base_fare
    );
    println!("Ticket log: {}", network.tickets.path().display());

    if network.directory.line_count() > 0 {
        println!("\nLines:");
        for line in network.directory.lines() {
            let ends = match (line.stations.first(), line.stations.last()) {
                (Some(first), Some(last)) => format!("{first} - {last}"),
                _ => "(no stations)".to_string(),
            };
            println!("  {} ({} stations): {}", line.name, line.stations.len(), ends);
        }
    }

    if components.len() > 1 {
        println!("\nComponents:");
        for (i, component) in components.iter().enumerate() {
            println!("  {}. {} station(s)", i + 1, component.len());
        }
    }

    Ok(())
}

fn cmd_validate(network: &Network) -> Result<()> {
    let report = metro_nav::health::check(&network.directory, &network.graph);

    for issue in &report.issues {
        println!("WARN: {issue}");
    }
    if report.components > 1 {
        println!(
            "WARN: network splits into {} disconnected components",
            report.components
        );
    }

    if report.is_clean() {
        println!(
            "Network is valid: {} stations, {} lines, {} connections.",
            report.stations, report.lines, report.connections
        );
    } else {
        println!("\n{} issue(s) found.", report.issues.len());
    }

    Ok(())
}
