//! Fewest-hop path finding between stations.

use metro_core::graph::{NetworkGraph, Path};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Find the path with the fewest hops from `source` to `target`.
///
/// Breadth-first over the graph's fixed neighbor order, so among equally short
/// routes the first one reached wins and repeated queries agree.
///
/// Returns `None` when either station is not in the graph or when the two lie in
/// different components. `source == target` yields the one-station path.
pub fn shortest_path(graph: &NetworkGraph, source: &str, target: &str) -> Option<Path> {
    if !graph.contains(source) || !graph.contains(target) {
        return None;
    }

    if source == target {
        return Some(Path::new(vec![source.to_string()]));
    }

    let mut queue: VecDeque<(&str, Vec<&str>)> = VecDeque::new();
    let mut visited: HashSet<&str> = HashSet::new();

    queue.push_back((source, vec![source]));
    visited.insert(source);

    while let Some((current, path)) = queue.pop_front() {
        for neighbor in graph.neighbors(current) {
            let neighbor = neighbor.as_str();
            if !visited.insert(neighbor) {
                continue;
            }

            let mut new_path = path.clone();
            new_path.push(neighbor);

            if neighbor == target {
                debug!(source, target, hops = new_path.len() - 1, "route found");
                return Some(Path::new(
                    new_path.into_iter().map(str::to_string).collect(),
                ));
            }

            queue.push_back((neighbor, new_path));
        }
    }

    debug!(source, target, "no route");
    None
}
