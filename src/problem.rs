//! Planning problem: the read-only inputs shared by every strategy.

use crate::graph::RoadGraph;
use crate::matrix::DistanceMatrix;
use crate::priority::PriorityMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Delivery metadata file: the HQ node and the nodes to visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryPlan {
    pub hq_node: i64,
    pub delivery_nodes: Vec<i64>,
}

impl DeliveryPlan {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let file = File::open(&path).map_err(|e| format!("Cannot open delivery file: {}", e))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| format!("Invalid delivery file: {}", e))
    }
}

/// Everything a tour strategy needs: HQ, delivery set, precomputed
/// distance matrix, and per-node priorities.
///
/// The matrix is derived once per planning run and reused across all
/// strategies; nothing here is mutated after construction.
#[derive(Debug, Clone)]
pub struct PlanningProblem {
    pub hq: i64,
    pub deliveries: Vec<i64>,
    pub matrix: DistanceMatrix,
    pub priorities: PriorityMap,
}

impl PlanningProblem {
    /// Validate and assemble a problem from its parts.
    ///
    /// Rejects HQ appearing among the deliveries, duplicate deliveries,
    /// and deliveries without an assigned priority.
    pub fn new(
        hq: i64,
        deliveries: Vec<i64>,
        matrix: DistanceMatrix,
        priorities: PriorityMap,
    ) -> Result<Self, String> {
        if deliveries.contains(&hq) {
            return Err(format!("HQ node {} listed among delivery nodes", hq));
        }
        let unique: HashSet<i64> = deliveries.iter().copied().collect();
        if unique.len() != deliveries.len() {
            return Err("Duplicate delivery nodes".to_string());
        }
        if !priorities.covers(&deliveries) {
            return Err("Priority map does not cover all delivery nodes".to_string());
        }
        Ok(PlanningProblem {
            hq,
            deliveries,
            matrix,
            priorities,
        })
    }

    /// Build the distance matrix from the road graph and assemble the
    /// problem in one step.
    pub fn from_graph(
        graph: &RoadGraph,
        hq: i64,
        deliveries: Vec<i64>,
        priorities: PriorityMap,
    ) -> Result<Self, String> {
        let mut selected = Vec::with_capacity(deliveries.len() + 1);
        selected.push(hq);
        selected.extend_from_slice(&deliveries);
        let matrix = DistanceMatrix::build(graph, &selected);
        Self::new(hq, deliveries, matrix, priorities)
    }

    pub fn num_deliveries(&self) -> usize {
        self.deliveries.len()
    }

    /// Expected stop count of a complete tour: deliveries + HQ twice.
    pub fn expected_tour_len(&self) -> usize {
        self.deliveries.len() + 2
    }

    /// Summary of the problem for reporting.
    pub fn statistics(&self) -> ProblemStatistics {
        let reachable = self
            .deliveries
            .iter()
            .filter(|&&n| {
                self.matrix.get(self.hq, n) < crate::matrix::UNREACHABLE_DISTANCE
            })
            .count();
        let avg_distance_from_hq = if reachable > 0 {
            self.deliveries
                .iter()
                .map(|&n| self.matrix.get(self.hq, n))
                .filter(|&d| d < crate::matrix::UNREACHABLE_DISTANCE)
                .sum::<f64>()
                / reachable as f64
        } else {
            0.0
        };

        ProblemStatistics {
            hq: self.hq,
            num_deliveries: self.deliveries.len(),
            reachable_deliveries: reachable,
            avg_distance_from_hq,
        }
    }
}

/// Statistics about a planning problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemStatistics {
    pub hq: i64,
    pub num_deliveries: usize,
    pub reachable_deliveries: usize,
    pub avg_distance_from_hq: f64,
}

impl std::fmt::Display for ProblemStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Problem (HQ = {})", self.hq)?;
        writeln!(f, "  Deliveries: {}", self.num_deliveries)?;
        writeln!(
            f,
            "  Reachable from HQ: {}",
            self.reachable_deliveries
        )?;
        writeln!(
            f,
            "  Avg distance from HQ: {:.2} km",
            self.avg_distance_from_hq
        )
    }
}
