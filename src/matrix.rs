//! All-pairs shortest-path distance matrix over the selected node set.
//!
//! The matrix is keyed by ordered `(source, target)` id pairs and is
//! complete over the selection: unreachable pairs hold
//! [`UNREACHABLE_DISTANCE`] instead of being absent, because the tour
//! strategies perform direct lookups without existence checks.

use crate::graph::RoadGraph;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::HashMap;

/// Sentinel recorded for node pairs with no connecting path.
///
/// A large finite number rather than `f64::INFINITY` so that sums and
/// reciprocals over matrix entries stay finite while unreachable hops
/// still dominate any real tour cost.
pub const UNREACHABLE_DISTANCE: f64 = 1e9;

/// Shortest-path distances between every ordered pair of selected nodes.
#[derive(Debug, Clone, Default)]
pub struct DistanceMatrix {
    entries: HashMap<(i64, i64), f64>,
}

impl DistanceMatrix {
    /// Compute the matrix for `nodes` by running single-source Dijkstra
    /// from each of them.
    ///
    /// Sources are independent and read-only over the graph, so they are
    /// spread across threads. A source missing from the graph (or cut off
    /// from everything) produces a full row of sentinel entries, never an
    /// error.
    pub fn build(graph: &RoadGraph, nodes: &[i64]) -> Self {
        Self::build_inner(graph, nodes, None)
    }

    /// Same as [`build`](Self::build), ticking `progress` once per source.
    pub fn build_with_progress(graph: &RoadGraph, nodes: &[i64], progress: &ProgressBar) -> Self {
        Self::build_inner(graph, nodes, Some(progress))
    }

    fn build_inner(graph: &RoadGraph, nodes: &[i64], progress: Option<&ProgressBar>) -> Self {
        let rows: Vec<(i64, HashMap<i64, f64>)> = nodes
            .par_iter()
            .map(|&source| {
                let lengths = graph.shortest_path_lengths(source);
                if let Some(bar) = progress {
                    bar.inc(1);
                }
                (source, lengths)
            })
            .collect();

        let mut entries = HashMap::with_capacity(nodes.len() * nodes.len());
        for (source, lengths) in rows {
            for &target in nodes {
                let distance = lengths
                    .get(&target)
                    .copied()
                    .unwrap_or(UNREACHABLE_DISTANCE);
                entries.insert((source, target), distance);
            }
        }

        DistanceMatrix { entries }
    }

    /// Build a matrix from explicit symmetric distances.
    ///
    /// Inserts both key directions per pair and a zero diagonal for every
    /// mentioned node. Mainly useful for tests and synthetic problems.
    pub fn from_pairs(pairs: &[(i64, i64, f64)]) -> Self {
        let mut entries = HashMap::new();
        for &(u, v, d) in pairs {
            entries.insert((u, v), d);
            entries.insert((v, u), d);
            entries.insert((u, u), 0.0);
            entries.insert((v, v), 0.0);
        }
        DistanceMatrix { entries }
    }

    /// Distance from `u` to `v`, falling back to the sentinel for pairs
    /// outside the selection.
    pub fn get(&self, u: i64, v: i64) -> f64 {
        self.entries
            .get(&(u, v))
            .copied()
            .unwrap_or(UNREACHABLE_DISTANCE)
    }

    /// Whether the pair was recorded during construction.
    pub fn contains(&self, u: i64, v: i64) -> bool {
        self.entries.contains_key(&(u, v))
    }

    /// Number of recorded ordered pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph() -> RoadGraph {
        // 1 -1km- 2 -1km- 3 -1km- 4, node 9 isolated
        RoadGraph::from_parts(&[9], &[(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)])
    }

    #[test]
    fn test_known_shortest_paths() {
        let matrix = DistanceMatrix::build(&chain_graph(), &[1, 2, 3, 4]);
        assert_eq!(matrix.get(1, 4), 3.0);
        assert_eq!(matrix.get(4, 1), 3.0);
        assert_eq!(matrix.get(2, 3), 1.0);
    }

    #[test]
    fn test_zero_diagonal() {
        let matrix = DistanceMatrix::build(&chain_graph(), &[1, 2, 3, 4]);
        for node in [1, 2, 3, 4] {
            assert_eq!(matrix.get(node, node), 0.0);
        }
    }

    #[test]
    fn test_matrix_is_complete_over_selection() {
        let matrix = DistanceMatrix::build(&chain_graph(), &[1, 2, 9]);
        assert_eq!(matrix.len(), 9);
        for u in [1, 2, 9] {
            for v in [1, 2, 9] {
                assert!(matrix.contains(u, v));
            }
        }
    }

    #[test]
    fn test_unreachable_pairs_hold_sentinel() {
        let matrix = DistanceMatrix::build(&chain_graph(), &[1, 9]);
        assert_eq!(matrix.get(1, 9), UNREACHABLE_DISTANCE);
        assert_eq!(matrix.get(9, 1), UNREACHABLE_DISTANCE);
        // An isolated node still reaches itself.
        assert_eq!(matrix.get(9, 9), 0.0);
    }

    #[test]
    fn test_missing_source_fills_sentinel_row() {
        let matrix = DistanceMatrix::build(&chain_graph(), &[1, 99]);
        assert_eq!(matrix.get(99, 1), UNREACHABLE_DISTANCE);
        assert_eq!(matrix.get(99, 99), UNREACHABLE_DISTANCE);
    }

    #[test]
    fn test_unselected_pair_lookup_degrades_to_sentinel() {
        let matrix = DistanceMatrix::build(&chain_graph(), &[1, 2]);
        assert_eq!(matrix.get(1, 4), UNREACHABLE_DISTANCE);
    }

    #[test]
    fn test_from_pairs_symmetry() {
        let matrix = DistanceMatrix::from_pairs(&[(1, 2, 5.0)]);
        assert_eq!(matrix.get(1, 2), 5.0);
        assert_eq!(matrix.get(2, 1), 5.0);
        assert_eq!(matrix.get(1, 1), 0.0);
    }
}
