//! Read station/line directories and read/append the ticket log on disk.

use crate::config::DataConfig;
use crate::directory::{Directory, Line, Station, split_list};
use crate::graph::Path as RoutePath;
use crate::schema;
use crate::ticket::{LoggedTicket, Ticket, TicketSink};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// One row of `stations.csv`.
#[derive(Debug, Deserialize)]
struct StationRecord {
    id: String,
    name: String,
    #[serde(default)]
    lines: String,
}

/// One row of `lines.csv`.
#[derive(Debug, Deserialize)]
struct LineRecord {
    id: String,
    name: String,
    #[serde(default)]
    stations: String,
}

fn csv_reader(path: &Path) -> Result<csv::Reader<fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))
}

/// Load station records. Line memberships are `;`-separated.
pub fn load_stations(path: &Path) -> Result<Vec<Station>> {
    let mut reader = csv_reader(path)?;
    let mut stations = Vec::new();
    for (i, record) in reader.deserialize::<StationRecord>().enumerate() {
        let record =
            record.with_context(|| format!("bad station row {} in {}", i + 1, path.display()))?;
        stations.push(Station::new(
            record.id,
            record.name,
            split_list(&record.lines),
        ));
    }
    Ok(stations)
}

/// Load line records. Stations are `;`-separated, in travel order.
pub fn load_lines(path: &Path) -> Result<Vec<Line>> {
    let mut reader = csv_reader(path)?;
    let mut lines = Vec::new();
    for (i, record) in reader.deserialize::<LineRecord>().enumerate() {
        let record =
            record.with_context(|| format!("bad line row {} in {}", i + 1, path.display()))?;
        lines.push(Line::new(
            record.id,
            record.name,
            split_list(&record.stations),
        ));
    }
    Ok(lines)
}

/// Load both directories from the configured files under `project_root`.
pub fn load_directory(project_root: &Path, data: &DataConfig) -> Result<Directory> {
    let stations = load_stations(&data.stations_path(project_root))?;
    let lines = load_lines(&data.lines_path(project_root))?;
    debug!(
        stations = stations.len(),
        lines = lines.len(),
        "loaded directories"
    );
    Directory::new(stations, lines).context("invalid station/line directory")
}

/// Flat representation of a ticket in the CSV log.
#[derive(Debug, Serialize, Deserialize)]
struct TicketRow {
    ticket_id: String,
    start_station: String,
    end_station: String,
    price: u64,
    /// JSON array of station names.
    path: String,
    instructions: String,
    /// Absent from logs written before issue times were recorded.
    #[serde(default)]
    issued_at: Option<DateTime<Utc>>,
}

impl TicketRow {
    fn from_ticket(ticket: &Ticket) -> Result<Self> {
        Ok(Self {
            ticket_id: ticket.ticket_id.clone(),
            start_station: ticket.start_station.clone(),
            end_station: ticket.end_station.clone(),
            price: ticket.price,
            path: schema::path_to_json(&ticket.path)?,
            instructions: ticket.instructions.clone(),
            issued_at: Some(ticket.issued_at),
        })
    }

    fn into_logged(self, path: Option<RoutePath>) -> LoggedTicket {
        LoggedTicket {
            ticket_id: self.ticket_id,
            start_station: self.start_station,
            end_station: self.end_station,
            price: self.price,
            path,
            instructions: self.instructions,
            issued_at: self.issued_at,
        }
    }
}

/// Append-only CSV ticket log. Appends are serialized through an internal lock.
#[derive(Debug)]
pub struct CsvTicketStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvTicketStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every ticket in the log, oldest first. A missing log reads as empty.
    ///
    /// Rows the CSV reader cannot make sense of are logged and skipped. A row whose
    /// path does not decode is kept with `path: None`.
    pub fn load_all(&self) -> Result<Vec<LoggedTicket>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut tickets = Vec::new();
        for (i, row) in reader.deserialize::<TicketRow>().enumerate() {
            let row: TicketRow = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!("Skipping unreadable ticket row {} in {:?}: {err}", i + 1, self.path);
                    continue;
                }
            };
            let path = match schema::path_from_json(&row.path) {
                Ok(path) => Some(path),
                Err(err) => {
                    warn!("Ticket row {} in {:?} has an unreadable path: {err}", i + 1, self.path);
                    None
                }
            };
            tickets.push(row.into_logged(path));
        }
        debug!(count = tickets.len(), "loaded ticket log");
        Ok(tickets)
    }
}

impl TicketSink for CsvTicketStore {
    fn append(&self, ticket: &Ticket) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("ticket store lock poisoned"))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let needs_header = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(TicketRow::from_ticket(ticket)?)
            .with_context(|| format!("failed to write ticket to {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))?;
        Ok(())
    }
}
