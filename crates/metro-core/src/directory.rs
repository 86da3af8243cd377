//! Station and line directories, built once at startup and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Separator used inside a single CSV field to list lines or stations.
pub const LIST_SEPARATOR: char = ';';

static NO_LINES: BTreeSet<String> = BTreeSet::new();

/// A named stop in the network, served by zero or more lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    /// Names of the lines serving this station. Sorted, so iteration is stable.
    pub lines: BTreeSet<String>,
}

impl Station {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// A fixed route: consecutive stations in `stations` are directly connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    pub name: String,
    pub stations: Vec<String>,
}

impl Line {
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            stations: stations.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this line stops at `station`.
    pub fn serves(&self, station: &str) -> bool {
        self.stations.iter().any(|s| s == station)
    }
}

/// Errors raised while assembling a [`Directory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("duplicate station name: {0}")]
    DuplicateStation(String),
    #[error("duplicate line name: {0}")]
    DuplicateLine(String),
}

/// Immutable lookup tables for stations (by name) and lines (by name, in load order).
#[derive(Debug, Clone, Default)]
pub struct Directory {
    stations: BTreeMap<String, Station>,
    lines: Vec<Line>,
    line_index: HashMap<String, usize>,
}

impl Directory {
    /// Assemble a directory. Line order is preserved; it fixes the neighbor
    /// order of the network graph built from this directory.
    pub fn new(stations: Vec<Station>, lines: Vec<Line>) -> Result<Self, DirectoryError> {
        let mut station_map = BTreeMap::new();
        for station in stations {
            if station_map.contains_key(&station.name) {
                return Err(DirectoryError::DuplicateStation(station.name));
            }
            station_map.insert(station.name.clone(), station);
        }

        let mut line_index = HashMap::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if line_index.insert(line.name.clone(), i).is_some() {
                return Err(DirectoryError::DuplicateLine(line.name.clone()));
            }
        }

        Ok(Self {
            stations: station_map,
            lines,
            line_index,
        })
    }

    pub fn station(&self, name: &str) -> Option<&Station> {
        self.stations.get(name)
    }

    pub fn contains_station(&self, name: &str) -> bool {
        self.stations.contains_key(name)
    }

    /// All stations, sorted by name.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line(&self, name: &str) -> Option<&Line> {
        self.line_index.get(name).map(|&i| &self.lines[i])
    }

    /// All lines, in the order they were loaded.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines recorded for a station. Empty when the station is unknown.
    pub fn station_lines(&self, name: &str) -> &BTreeSet<String> {
        self.stations.get(name).map_or(&NO_LINES, |s| &s.lines)
    }
}

/// Split a `;`-separated field into trimmed, non-empty entries.
pub fn split_list(field: &str) -> Vec<String> {
    field
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
