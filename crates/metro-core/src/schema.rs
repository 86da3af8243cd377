//! Strict encoding of stored paths.
//!
//! A path is stored as a JSON array of station names. Decoding rejects
//! anything that is not a non-empty simple path.

use crate::graph::Path;
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Why a stored path could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum PathFormatError {
    #[error("path is not a JSON array of strings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("path is empty")]
    Empty,
    #[error("path entry {0} is blank")]
    BlankStation(usize),
    #[error("station '{0}' appears more than once in path")]
    RepeatedStation(String),
}

/// Serialize a path to its stored JSON form.
pub fn path_to_json(path: &Path) -> Result<String> {
    serde_json::to_string(path).context("failed to serialize path to JSON")
}

/// Parse and validate a stored path.
pub fn path_from_json(json: &str) -> Result<Path, PathFormatError> {
    let stations: Vec<String> = serde_json::from_str(json)?;
    if stations.is_empty() {
        return Err(PathFormatError::Empty);
    }

    let mut seen = HashSet::with_capacity(stations.len());
    for (i, station) in stations.iter().enumerate() {
        if station.trim().is_empty() {
            return Err(PathFormatError::BlankStation(i));
        }
        if !seen.insert(station.as_str()) {
            return Err(PathFormatError::RepeatedStation(station.clone()));
        }
    }

    Ok(Path::new(stations))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> Path {
        Path::new(names.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn test_path_round_trip_keeps_awkward_names() {
        let original = path(&["King's Cross", "A; B", "\"Quoted\"", "Ünïcode"]);
        let json = path_to_json(&original).unwrap();
        assert_eq!(path_from_json(&json).unwrap(), original);
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            path_from_json("['A', 'B']"),
            Err(PathFormatError::Json(_))
        ));
        assert!(matches!(
            path_from_json("{\"a\": 1}"),
            Err(PathFormatError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_empty_blank_and_repeats() {
        assert!(matches!(path_from_json("[]"), Err(PathFormatError::Empty)));
        assert!(matches!(
            path_from_json("[\"A\", \" \"]"),
            Err(PathFormatError::BlankStation(1))
        ));
        assert!(matches!(
            path_from_json("[\"A\", \"B\", \"A\"]"),
            Err(PathFormatError::RepeatedStation(ref s)) if s == "A"
        ));
    }
}
