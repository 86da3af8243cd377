//! Integrity checks across the station directory, line definitions, and graph.

use metro_core::directory::Directory;
use metro_core::graph::NetworkGraph;
use serde::Serialize;

/// A data inconsistency found in the network.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum NetworkIssue {
    /// A line lists a station that has no station record.
    UnknownStation { line: String, station: String },
    /// A station record claims a line that does not exist.
    UnknownLine { station: String, line: String },
    /// A station record claims a line whose sequence does not include it.
    StationNotOnLine { station: String, line: String },
    /// A line's sequence includes a station whose record does not list the line.
    MissingMembership { station: String, line: String },
    /// A line with fewer than two stations contributes no connections.
    ShortLine { line: String, stations: usize },
    /// A station with no connections.
    IsolatedStation { station: String },
}

/// Summary of a network check.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub stations: usize,
    pub lines: usize,
    pub connections: usize,
    /// Number of connected components; 1 means every station reaches every other.
    pub components: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<NetworkIssue>,
}

impl HealthReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.components <= 1
    }
}

/// Check the directory and graph for inconsistencies.
pub fn check(directory: &Directory, graph: &NetworkGraph) -> HealthReport {
    let mut issues = Vec::new();

    for line in directory.lines() {
        if line.stations.len() < 2 {
            issues.push(NetworkIssue::ShortLine {
                line: line.name.clone(),
                stations: line.stations.len(),
            });
        }
        for name in &line.stations {
            match directory.station(name) {
                None => issues.push(NetworkIssue::UnknownStation {
                    line: line.name.clone(),
                    station: name.clone(),
                }),
                Some(station) if !station.lines.contains(&line.name) => {
                    issues.push(NetworkIssue::MissingMembership {
                        station: name.clone(),
                        line: line.name.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    for station in directory.stations() {
        for line_name in &station.lines {
            match directory.line(line_name) {
                None => issues.push(NetworkIssue::UnknownLine {
                    station: station.name.clone(),
                    line: line_name.clone(),
                }),
                Some(line) if !line.serves(&station.name) => {
                    issues.push(NetworkIssue::StationNotOnLine {
                        station: station.name.clone(),
                        line: line_name.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    for station in graph.stations() {
        if graph.neighbors(station).is_empty() {
            issues.push(NetworkIssue::IsolatedStation {
                station: station.to_string(),
            });
        }
    }

    HealthReport {
        stations: graph.station_count(),
        lines: directory.line_count(),
        connections: graph.edge_count(),
        components: graph.components().len(),
        issues,
    }
}

impl std::fmt::Display for NetworkIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStation { line, station } => {
                write!(f, "line '{line}' lists unknown station '{station}'")
            }
            Self::UnknownLine { station, line } => {
                write!(f, "station '{station}' claims unknown line '{line}'")
            }
            Self::StationNotOnLine { station, line } => {
                write!(f, "station '{station}' claims line '{line}', which does not stop there")
            }
            Self::MissingMembership { station, line } => {
                write!(f, "line '{line}' stops at '{station}', but the station does not list it")
            }
            Self::ShortLine { line, stations } => {
                write!(f, "line '{line}' has only {stations} station(s)")
            }
            Self::IsolatedStation { station } => {
                write!(f, "station '{station}' has no connections")
            }
        }
    }
}
