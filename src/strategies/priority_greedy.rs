//! Priority-weighted greedy strategy.
//!
//! Walks from HQ, always picking the unvisited delivery with the best
//! blend of urgency and proximity:
//!
//! ```text
//! score(n) = priority_weight * priority(n)
//!          + distance_weight * (1 / distance(current, n))
//! ```
//!
//! The default 0.70 / 0.30 split favors priority over travel cost; both
//! weights are configuration, not constants baked into the loop.

use crate::problem::PlanningProblem;
use crate::strategies::TourStrategy;
use crate::tour::PlannedTour;
use ordered_float::OrderedFloat;

pub struct PriorityGreedyStrategy {
    pub priority_weight: f64,
    pub distance_weight: f64,
}

impl PriorityGreedyStrategy {
    pub fn new() -> Self {
        PriorityGreedyStrategy {
            priority_weight: 0.7,
            distance_weight: 0.3,
        }
    }

    pub fn with_weights(priority_weight: f64, distance_weight: f64) -> Self {
        PriorityGreedyStrategy {
            priority_weight,
            distance_weight,
        }
    }

    fn score(&self, problem: &PlanningProblem, current: i64, candidate: i64) -> f64 {
        // The matrix substitutes a large finite sentinel for unreachable
        // pairs, so the reciprocal stays a tiny nonzero term instead of a
        // division by zero.
        let dist = problem.matrix.get(current, candidate);
        let priority = problem.priorities.priority(candidate) as f64;
        self.priority_weight * priority + self.distance_weight * (1.0 / dist)
    }
}

impl Default for PriorityGreedyStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl TourStrategy for PriorityGreedyStrategy {
    fn plan(&self, problem: &PlanningProblem) -> PlannedTour {
        let start = std::time::Instant::now();

        let mut unvisited = problem.deliveries.clone();
        let mut tour = Vec::with_capacity(problem.expected_tour_len());
        tour.push(problem.hq);
        let mut current = problem.hq;

        while !unvisited.is_empty() {
            // Max by score, ties broken by the smallest node id so the
            // selection is reproducible regardless of input order.
            let mut best_pos = 0;
            let mut best_key = (
                OrderedFloat(self.score(problem, current, unvisited[0])),
                std::cmp::Reverse(unvisited[0]),
            );
            for (pos, &candidate) in unvisited.iter().enumerate().skip(1) {
                let key = (
                    OrderedFloat(self.score(problem, current, candidate)),
                    std::cmp::Reverse(candidate),
                );
                if key > best_key {
                    best_key = key;
                    best_pos = pos;
                }
            }

            let next = unvisited.swap_remove(best_pos);
            tour.push(next);
            current = next;
        }

        tour.push(problem.hq);

        let mut planned = PlannedTour::from_tour(&problem.matrix, tour, self.name());
        planned.computation_time = start.elapsed().as_secs_f64();
        planned
    }

    fn name(&self) -> &str {
        "PriorityGreedy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DistanceMatrix, UNREACHABLE_DISTANCE};
    use crate::priority::PriorityMap;
    use std::collections::HashMap;

    fn equal_distance_matrix(hq: i64, deliveries: &[i64]) -> DistanceMatrix {
        let mut pairs = Vec::new();
        for (i, &u) in deliveries.iter().enumerate() {
            pairs.push((hq, u, 5.0));
            for &v in &deliveries[i + 1..] {
                pairs.push((u, v, 5.0));
            }
        }
        DistanceMatrix::from_pairs(&pairs)
    }

    fn priorities(assignments: &[(i64, u8)]) -> PriorityMap {
        let map: HashMap<i64, u8> = assignments.iter().copied().collect();
        PriorityMap::new(map).unwrap()
    }

    #[test]
    fn test_highest_priority_visited_first() {
        let deliveries = vec![2, 3, 4, 5];
        let matrix = equal_distance_matrix(1, &deliveries);
        let prio = priorities(&[(2, 1), (3, 1), (4, 10), (5, 1)]);
        let problem = PlanningProblem::new(1, deliveries, matrix, prio).unwrap();

        let tour = PriorityGreedyStrategy::new().plan(&problem);
        assert_eq!(tour.tour[1], 4);
        assert!(tour.is_complete(1, &problem.deliveries));
    }

    #[test]
    fn test_tie_break_smallest_id() {
        let deliveries = vec![5, 3, 4, 2];
        let matrix = equal_distance_matrix(1, &deliveries);
        let prio = priorities(&[(2, 7), (3, 7), (4, 7), (5, 7)]);
        let problem = PlanningProblem::new(1, deliveries, matrix, prio).unwrap();

        let tour = PriorityGreedyStrategy::new().plan(&problem);
        // Equal scores everywhere: node ids decide, ascending.
        assert_eq!(tour.tour, vec![1, 2, 3, 4, 5, 1]);
    }

    #[test]
    fn test_nearby_node_can_outrank_priority() {
        // Priority difference of 1 (0.7 in score) loses against a strong
        // inverse-distance edge: 0.3 * (1/0.1 - 1/5.0) = 2.94.
        let matrix = DistanceMatrix::from_pairs(&[(1, 2, 0.1), (1, 3, 5.0), (2, 3, 5.0)]);
        let prio = priorities(&[(2, 5), (3, 6)]);
        let problem = PlanningProblem::new(1, vec![2, 3], matrix, prio).unwrap();

        let tour = PriorityGreedyStrategy::new().plan(&problem);
        assert_eq!(tour.tour[1], 2);
    }

    #[test]
    fn test_unreachable_candidate_scores_near_zero_distance_term() {
        // Node 9 has no matrix entries; its reciprocal term is 1/sentinel,
        // tiny but finite, so it is picked last and nothing panics.
        let matrix = DistanceMatrix::from_pairs(&[(1, 2, 1.0), (1, 3, 1.0), (2, 3, 1.0)]);
        let prio = priorities(&[(2, 5), (3, 5), (9, 5)]);
        let problem = PlanningProblem::new(1, vec![2, 3, 9], matrix, prio).unwrap();

        let tour = PriorityGreedyStrategy::new().plan(&problem);
        assert!(tour.is_complete(1, &[2, 3, 9]));
        assert_eq!(*tour.tour.get(3).unwrap(), 9);
        assert!(tour.cost >= UNREACHABLE_DISTANCE);
        assert!(tour.cost.is_finite());
    }

    #[test]
    fn test_empty_deliveries() {
        let matrix = DistanceMatrix::from_pairs(&[(1, 1, 0.0)]);
        let prio = PriorityMap::random(&[], 0);
        let problem = PlanningProblem::new(1, vec![], matrix, prio).unwrap();
        let tour = PriorityGreedyStrategy::new().plan(&problem);
        assert_eq!(tour.tour, vec![1, 1]);
        assert_eq!(tour.cost, 0.0);
    }
}
