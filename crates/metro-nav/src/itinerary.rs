//! Turn a station path into numbered, line-aware travel instructions and a fare.

use metro_core::directory::Directory;
use metro_core::graph::Path;
use serde::Serialize;
use std::fmt;

/// A line serving both stations. When several do, the alphabetically first wins.
pub fn connecting_line<'a>(directory: &'a Directory, a: &str, b: &str) -> Option<&'a str> {
    let lines_b = directory.station_lines(b);
    directory
        .station_lines(a)
        .iter()
        .find(|line| lines_b.contains(*line))
        .map(String::as_str)
}

/// Ordered, numbered travel steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Itinerary {
    steps: Vec<String>,
}

impl Itinerary {
    fn push(&mut self, text: impl fmt::Display) {
        let step = format!("{}. {}", self.steps.len() + 1, text);
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.steps.join("\n"))
    }
}

/// Build the instruction list for `path`.
///
/// A step is emitted when the first line is boarded and at every line change;
/// hops that stay on the current line are silent. The trip ends with an arrival
/// step. If no hop can be attributed to any line, the whole trip collapses to a
/// single "travel directly" step.
pub fn instructions(path: &Path, directory: &Directory) -> Itinerary {
    let mut itinerary = Itinerary::default();
    let stations = path.stations();

    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return itinerary;
    };

    if stations.len() == 1 {
        itinerary.push(format_args!("Arrive at final destination {last}."));
        return itinerary;
    }

    let mut current_line: Option<&str> = None;
    for hop in stations.windows(2) {
        let (from, to) = (hop[0].as_str(), hop[1].as_str());
        let Some(line) = connecting_line(directory, from, to) else {
            continue;
        };
        match current_line {
            None => itinerary.push(format_args!("Start on {line} from {from}.")),
            Some(current) if current != line => {
                itinerary.push(format_args!("Change to {line} at {from}."));
            }
            Some(_) => continue,
        }
        current_line = Some(line);
    }

    if itinerary.is_empty() {
        itinerary.push(format_args!("Travel directly from {first} to {last}."));
        return itinerary;
    }

    itinerary.push(format_args!("Arrive at final destination {last}."));
    itinerary
}

/// Price of a trip: one base fare per hop.
pub fn fare(path: &Path, base_fare: u64) -> u64 {
    (path.hops() as u64).saturating_mul(base_fare)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metro_core::directory::{Line, Station};

    fn path(names: &[&str]) -> Path {
        Path::new(names.iter().map(|s| (*s).to_string()).collect())
    }

    /// L1 = A-B-C, L2 = C-D-E.
    fn two_lines() -> Directory {
        Directory::new(
            vec![
                Station::new("1", "A", ["L1"]),
                Station::new("2", "B", ["L1"]),
                Station::new("3", "C", ["L1", "L2"]),
                Station::new("4", "D", ["L2"]),
                Station::new("5", "E", ["L2"]),
            ],
            vec![
                Line::new("1", "L1", ["A", "B", "C"]),
                Line::new("2", "L2", ["C", "D", "E"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_connecting_line() {
        let dir = two_lines();
        assert_eq!(connecting_line(&dir, "A", "B"), Some("L1"));
        assert_eq!(connecting_line(&dir, "C", "D"), Some("L2"));
        assert_eq!(connecting_line(&dir, "A", "E"), None);
        assert_eq!(connecting_line(&dir, "A", "Nowhere"), None);
    }

    #[test]
    fn test_connecting_line_picks_alphabetically_first() {
        let dir = Directory::new(
            vec![
                Station::new("1", "X", ["Yellow", "Blue", "Red"]),
                Station::new("2", "Y", ["Red", "Yellow", "Blue"]),
            ],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(connecting_line(&dir, "X", "Y"), Some("Blue"));
        assert_eq!(connecting_line(&dir, "Y", "X"), Some("Blue"));
    }

    #[test]
    fn test_line_change_instructions() {
        let itinerary = instructions(&path(&["A", "B", "C", "D", "E"]), &two_lines());
        assert_eq!(
            itinerary.steps(),
            [
                "1. Start on L1 from A.",
                "2. Change to L2 at C.",
                "3. Arrive at final destination E.",
            ]
        );
        assert_eq!(
            itinerary.to_string(),
            "1. Start on L1 from A.\n2. Change to L2 at C.\n3. Arrive at final destination E."
        );
    }

    #[test]
    fn test_single_hop_instructions() {
        let itinerary = instructions(&path(&["A", "B"]), &two_lines());
        assert_eq!(
            itinerary.steps(),
            ["1. Start on L1 from A.", "2. Arrive at final destination B."]
        );
    }

    #[test]
    fn test_no_line_found_travels_directly() {
        let dir = Directory::new(
            vec![Station::new("1", "X", ["Red"]), Station::new("2", "Y", ["Blue"])],
            Vec::new(),
        )
        .unwrap();
        let itinerary = instructions(&path(&["X", "Y"]), &dir);
        assert_eq!(itinerary.steps(), ["1. Travel directly from X to Y."]);
    }

    #[test]
    fn test_unattributed_hop_is_skipped() {
        // D -> Q has no shared line; the trip still starts on L2 and arrives
        let dir = Directory::new(
            vec![
                Station::new("4", "D", ["L2"]),
                Station::new("5", "E", ["L2"]),
                Station::new("6", "Q", ["L9"]),
            ],
            Vec::new(),
        )
        .unwrap();
        let itinerary = instructions(&path(&["Q", "D", "E"]), &dir);
        assert_eq!(
            itinerary.steps(),
            ["1. Start on L2 from D.", "2. Arrive at final destination E."]
        );
    }

    #[test]
    fn test_single_station_path() {
        let itinerary = instructions(&path(&["A"]), &two_lines());
        assert_eq!(itinerary.steps(), ["1. Arrive at final destination A."]);
    }

    #[test]
    fn test_empty_path() {
        let itinerary = instructions(&path(&[]), &two_lines());
        assert!(itinerary.is_empty());
        assert_eq!(itinerary.to_string(), "");
    }

    #[test]
    fn test_fare() {
        assert_eq!(fare(&path(&["A", "B", "C", "D"]), 10), 30);
        assert_eq!(fare(&path(&["A"]), 10), 0);
        assert_eq!(fare(&path(&[]), 10), 0);
    }
}
