//! Navigation over the metro network.
//!
//! Provides shortest-path search, line-aware travel instructions and fares,
//! ticket purchase, map export, and network integrity checks.

pub mod booking;
pub mod export;
pub mod health;
pub mod itinerary;
pub mod paths;
