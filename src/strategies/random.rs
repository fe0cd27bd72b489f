//! Random baseline: a uniform permutation of the deliveries.

use crate::problem::PlanningProblem;
use crate::strategies::TourStrategy;
use crate::tour::PlannedTour;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Uniformly random visit order, wrapped with HQ at both ends.
///
/// No optimization at all; it exists as the quality floor the other
/// strategies are compared against. Seeded for reproducible runs.
pub struct RandomStrategy {
    pub seed: u64,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        RandomStrategy { seed }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new(42)
    }
}

impl TourStrategy for RandomStrategy {
    fn plan(&self, problem: &PlanningProblem) -> PlannedTour {
        let start = std::time::Instant::now();
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let mut order = problem.deliveries.clone();
        order.shuffle(&mut rng);

        let mut tour = Vec::with_capacity(problem.expected_tour_len());
        tour.push(problem.hq);
        tour.extend(order);
        tour.push(problem.hq);

        let mut planned = PlannedTour::from_tour(&problem.matrix, tour, self.name());
        planned.computation_time = start.elapsed().as_secs_f64();
        planned
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DistanceMatrix, UNREACHABLE_DISTANCE};
    use crate::priority::PriorityMap;

    fn line_problem() -> PlanningProblem {
        // A=1, B=2, C=3, D=4 on a line at 0, 1, 2, 3 km.
        let matrix = DistanceMatrix::from_pairs(&[
            (1, 2, 1.0),
            (1, 3, 2.0),
            (1, 4, 3.0),
            (2, 3, 1.0),
            (2, 4, 2.0),
            (3, 4, 1.0),
        ]);
        let priorities = PriorityMap::random(&[2, 3, 4], 0);
        PlanningProblem::new(1, vec![2, 3, 4], matrix, priorities).unwrap()
    }

    #[test]
    fn test_tour_shape() {
        let problem = line_problem();
        let tour = RandomStrategy::new(1).plan(&problem);
        assert!(tour.is_complete(problem.hq, &problem.deliveries));
        assert_eq!(tour.tour.len(), problem.expected_tour_len());
    }

    #[test]
    fn test_finite_cost_on_connected_problem() {
        let problem = line_problem();
        let tour = RandomStrategy::new(1).plan(&problem);
        assert!(tour.cost < UNREACHABLE_DISTANCE);
        assert!(tour.cost >= 0.0);
    }

    #[test]
    fn test_seed_reproducibility() {
        let problem = line_problem();
        let a = RandomStrategy::new(9).plan(&problem);
        let b = RandomStrategy::new(9).plan(&problem);
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.cost, b.cost);
    }

    #[test]
    fn test_empty_deliveries() {
        let matrix = DistanceMatrix::from_pairs(&[(1, 1, 0.0)]);
        let priorities = PriorityMap::random(&[], 0);
        let problem = PlanningProblem::new(1, vec![], matrix, priorities).unwrap();
        let tour = RandomStrategy::new(1).plan(&problem);
        assert_eq!(tour.tour, vec![1, 1]);
        assert_eq!(tour.cost, 0.0);
    }

    #[test]
    fn test_disconnected_delivery_inflates_cost() {
        let matrix = DistanceMatrix::from_pairs(&[(1, 2, 1.0)]);
        // Node 9 has no recorded pairs; lookups fall back to the sentinel.
        let priorities = PriorityMap::random(&[2, 9], 0);
        let problem = PlanningProblem::new(1, vec![2, 9], matrix, priorities).unwrap();
        let tour = RandomStrategy::new(1).plan(&problem);
        assert!(tour.is_complete(1, &[2, 9]));
        assert!(tour.cost >= UNREACHABLE_DISTANCE);
    }
}
