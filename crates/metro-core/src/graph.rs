//! Undirected station graph derived from line definitions.

use crate::directory::Directory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use tracing::{debug, warn};

/// The metro network: station name → directly reachable stations.
///
/// Edge (A, B) exists iff some line lists A and B next to each other, in either
/// order. Neighbor lists keep first-appearance order: lines are walked in
/// directory order and each line front to back. Path search relies on this
/// order to break ties between equally short routes.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    adjacency: BTreeMap<String, Vec<String>>,
}

impl NetworkGraph {
    /// Build the graph from a directory. Every known station becomes a node,
    /// even if no line serves it.
    pub fn build(directory: &Directory) -> Self {
        let mut adjacency: BTreeMap<String, Vec<String>> = directory
            .stations()
            .map(|s| (s.name.clone(), Vec::new()))
            .collect();

        for line in directory.lines() {
            for name in &line.stations {
                if !adjacency.contains_key(name) {
                    warn!(line = %line.name, station = %name, "line references unknown station");
                    adjacency.insert(name.clone(), Vec::new());
                }
            }
            for pair in line.stations.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if a == b {
                    continue;
                }
                Self::link(&mut adjacency, a, b);
                Self::link(&mut adjacency, b, a);
            }
        }

        let graph = Self { adjacency };
        debug!(
            stations = graph.station_count(),
            edges = graph.edge_count(),
            lines = directory.line_count(),
            "built network graph"
        );
        graph
    }

    fn link(adjacency: &mut BTreeMap<String, Vec<String>>, from: &str, to: &str) {
        let neighbors = adjacency.entry(from.to_string()).or_default();
        if !neighbors.iter().any(|n| n == to) {
            neighbors.push(to.to_string());
        }
    }

    pub fn contains(&self, station: &str) -> bool {
        self.adjacency.contains_key(station)
    }

    /// Direct neighbors in first-appearance order. Empty for unknown stations.
    pub fn neighbors(&self, station: &str) -> &[String] {
        self.adjacency.get(station).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All station names, sorted.
    pub fn stations(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Each undirected edge once, as `(smaller, larger)` by name.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (station, neighbors) in &self.adjacency {
            for neighbor in neighbors {
                if station < neighbor {
                    edges.push((station.as_str(), neighbor.as_str()));
                }
            }
        }
        edges
    }

    /// Connected components, each sorted by name, ordered by their smallest member.
    pub fn components(&self) -> Vec<Vec<String>> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut components = Vec::new();

        for start in self.adjacency.keys() {
            if !seen.insert(start.as_str()) {
                continue;
            }
            let mut members = vec![start.clone()];
            let mut queue = VecDeque::from([start.as_str()]);
            while let Some(current) = queue.pop_front() {
                for neighbor in self.neighbors(current) {
                    if seen.insert(neighbor.as_str()) {
                        members.push(neighbor.clone());
                        queue.push_back(neighbor.as_str());
                    }
                }
            }
            members.sort();
            components.push(members);
        }

        components
    }
}

/// An ordered sequence of stations, start to end inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    stations: Vec<String>,
}

impl Path {
    pub fn new(stations: Vec<String>) -> Self {
        Self { stations }
    }

    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn into_stations(self) -> Vec<String> {
        self.stations
    }

    pub fn first(&self) -> Option<&str> {
        self.stations.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.stations.last().map(String::as_str)
    }

    /// Number of stations on the path.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of edges traversed (stations - 1).
    pub fn hops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    /// True when no station appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.stations.iter().all(|s| seen.insert(s.as_str()))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stations.join(" -> "))
    }
}
