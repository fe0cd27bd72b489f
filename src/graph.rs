//! Road-network graph loading and shortest-path queries.
//!
//! The planner consumes an undirected weighted graph over OSM-style node
//! identifiers. Raw graph files carry heterogeneous edge attributes; this
//! module resolves which attribute holds the travel distance, drops edges
//! that lack it, and normalizes everything to kilometres before any
//! routing happens.

use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Edge attributes tried in order when resolving the distance weight.
pub const WEIGHT_ATTRIBUTES: [&str; 2] = ["d10", "length"];

/// Raw values above this threshold are assumed to be metres and are
/// scaled down to kilometres.
const METRES_THRESHOLD: f64 = 1000.0;

/// An edge as it appears in the raw graph file, before weight resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdge {
    pub source: i64,
    pub target: i64,
    #[serde(default)]
    pub attributes: HashMap<String, f64>,
}

/// On-disk graph representation: node ids plus attributed edges.
#[derive(Debug, Serialize, Deserialize)]
pub struct RawGraphFile {
    pub nodes: Vec<i64>,
    pub edges: Vec<RawEdge>,
}

/// Summary statistics over resolved edge lengths.
#[derive(Debug, Clone, Copy)]
pub struct EdgeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Undirected road network with a single resolved distance weight per edge.
///
/// Node identifiers are stable across the planning run; `petgraph` indices
/// are an internal detail and never leak to callers.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    graph: UnGraph<i64, f64>,
    node_map: HashMap<i64, NodeIndex>,
}

impl RoadGraph {
    /// Build a graph from explicit nodes and pre-resolved edge weights.
    ///
    /// Nodes referenced by edges but absent from `nodes` are added
    /// implicitly; listing a node with no edges keeps it in the graph as
    /// an isolated (unreachable) vertex.
    pub fn from_parts(nodes: &[i64], edges: &[(i64, i64, f64)]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut node_map = HashMap::new();

        for &id in nodes {
            node_map.entry(id).or_insert_with(|| graph.add_node(id));
        }

        for &(u, v, weight) in edges {
            let iu = *node_map.entry(u).or_insert_with(|| graph.add_node(u));
            let iv = *node_map.entry(v).or_insert_with(|| graph.add_node(v));
            graph.add_edge(iu, iv, weight);
        }

        RoadGraph { graph, node_map }
    }

    /// Load a graph from a JSON file, resolving the weight attribute and
    /// normalizing units.
    ///
    /// The first edge is sampled to decide which attribute carries the
    /// distance (`d10` preferred, `length` as fallback); edges missing
    /// the chosen attribute are dropped before the graph is built.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let file = File::open(&path).map_err(|e| format!("Cannot open graph file: {}", e))?;
        let reader = BufReader::new(file);
        let raw: RawGraphFile =
            serde_json::from_reader(reader).map_err(|e| format!("Invalid graph file: {}", e))?;
        Self::from_raw(raw)
    }

    /// Resolve weights on an already-parsed raw graph.
    pub fn from_raw(raw: RawGraphFile) -> Result<Self, String> {
        let sample = raw
            .edges
            .first()
            .ok_or_else(|| "Graph has no edges".to_string())?;

        let weight_attr = WEIGHT_ATTRIBUTES
            .iter()
            .find(|attr| sample.attributes.contains_key(**attr))
            .copied()
            .ok_or_else(|| {
                format!(
                    "No usable weight attribute ({}) found on graph edges",
                    WEIGHT_ATTRIBUTES.join(" or ")
                )
            })?;

        let total = raw.edges.len();
        let mut edges = Vec::with_capacity(total);
        for edge in &raw.edges {
            if let Some(&value) = edge.attributes.get(weight_attr) {
                edges.push((edge.source, edge.target, normalize_distance(value)));
            }
        }

        let dropped = total - edges.len();
        if dropped > 0 {
            log::warn!(
                "Dropped {} of {} edges without the '{}' attribute",
                dropped,
                total,
                weight_attr
            );
        }
        log::info!(
            "Resolved edge weights from '{}' ({} edges kept)",
            weight_attr,
            edges.len()
        );

        Ok(Self::from_parts(&raw.nodes, &edges))
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the given node id exists in the graph.
    pub fn contains(&self, node: i64) -> bool {
        self.node_map.contains_key(&node)
    }

    /// All node ids, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.graph.node_weights().copied()
    }

    /// Shortest-path distances from `source` to every reachable node.
    ///
    /// Returns an empty map when the source is not in the graph; callers
    /// decide how to treat unreachable targets.
    pub fn shortest_path_lengths(&self, source: i64) -> HashMap<i64, f64> {
        let Some(&start) = self.node_map.get(&source) else {
            return HashMap::new();
        };
        dijkstra(&self.graph, start, None, |e| *e.weight())
            .into_iter()
            .map(|(idx, dist)| (self.graph[idx], dist))
            .collect()
    }

    /// Point-to-point shortest-path distance, `None` when unreachable or
    /// either endpoint is missing from the graph.
    pub fn shortest_path_length(&self, source: i64, target: i64) -> Option<f64> {
        let &start = self.node_map.get(&source)?;
        let &goal = self.node_map.get(&target)?;
        dijkstra(&self.graph, start, Some(goal), |e| *e.weight())
            .get(&goal)
            .copied()
    }

    /// Min / max / mean resolved edge length, `None` for an edgeless graph.
    pub fn edge_stats(&self) -> Option<EdgeStats> {
        if self.graph.edge_count() == 0 {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for edge in self.graph.edge_references() {
            let w = *edge.weight();
            min = min.min(w);
            max = max.max(w);
            sum += w;
        }
        Some(EdgeStats {
            min,
            max,
            mean: sum / self.graph.edge_count() as f64,
        })
    }
}

/// Auto-scale metre-valued distances to kilometres.
fn normalize_distance(raw: f64) -> f64 {
    if raw > METRES_THRESHOLD {
        raw / 1000.0
    } else {
        raw
    }
}
