//! Export the metro network as DOT (Graphviz) or a Mermaid flowchart.

use crate::itinerary::connecting_line;
use metro_core::directory::Directory;
use metro_core::graph::NetworkGraph;
use std::collections::HashMap;
use std::fmt::Write;

/// Export format for map rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Dot,
    Mermaid,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dot" | "graphviz" => Some(Self::Dot),
            "mermaid" | "md" => Some(Self::Mermaid),
            _ => None,
        }
    }
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Export the network as an undirected DOT graph. Edges are labelled with the line serving them.
pub fn export_dot(graph: &NetworkGraph, directory: &Directory) -> String {
    let mut out = String::new();
    writeln!(out, "graph Metro {{").unwrap();
    writeln!(out, "  layout=neato;").unwrap();
    writeln!(out, "  overlap=false;").unwrap();
    writeln!(
        out,
        "  node [shape=circle, style=filled, fillcolor=\"#87ceeb\", fontsize=10];"
    )
    .unwrap();
    writeln!(out).unwrap();

    for station in graph.stations() {
        writeln!(out, "  \"{}\";", dot_escape(station)).unwrap();
    }

    writeln!(out).unwrap();

    for (a, b) in graph.edges() {
        match connecting_line(directory, a, b) {
            Some(line) => writeln!(
                out,
                "  \"{}\" -- \"{}\" [label=\"{}\"];",
                dot_escape(a),
                dot_escape(b),
                dot_escape(line)
            )
            .unwrap(),
            None => writeln!(out, "  \"{}\" -- \"{}\";", dot_escape(a), dot_escape(b)).unwrap(),
        }
    }

    writeln!(out, "}}").unwrap();
    out
}

/// Export the network as a Mermaid flowchart.
pub fn export_mermaid(graph: &NetworkGraph, directory: &Directory) -> String {
    // Mermaid node ids must be plain identifiers; number stations in name order.
    let ids: HashMap<&str, String> = graph
        .stations()
        .enumerate()
        .map(|(i, name)| (name, format!("s{i}")))
        .collect();

    let mut out = String::new();
    writeln!(out, "flowchart LR").unwrap();

    for station in graph.stations() {
        writeln!(
            out,
            "  {}[\"{}\"]",
            ids[station],
            station.replace('"', "#quot;")
        )
        .unwrap();
    }

    for (a, b) in graph.edges() {
        match connecting_line(directory, a, b) {
            Some(line) => writeln!(
                out,
                "  {} ---|{}| {}",
                ids[a],
                line.replace('|', "/"),
                ids[b]
            )
            .unwrap(),
            None => writeln!(out, "  {} --- {}", ids[a], ids[b]).unwrap(),
        }
    }

    out
}

/// Export the network in the specified format.
pub fn export(graph: &NetworkGraph, directory: &Directory, format: ExportFormat) -> String {
    match format {
        ExportFormat::Dot => export_dot(graph, directory),
        ExportFormat::Mermaid => export_mermaid(graph, directory),
    }
}
