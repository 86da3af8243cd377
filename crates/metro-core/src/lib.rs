//! Core types and storage for the metro ticketing system.
//!
//! Provides the station/line directory ([`directory::Directory`]), the undirected
//! network graph ([`graph::NetworkGraph`]), issued tickets, CSV persistence, and
//! configuration loading.

pub mod config;
pub mod directory;
pub mod graph;
pub mod schema;
pub mod storage;
pub mod ticket;
