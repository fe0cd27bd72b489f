//! Strategy comparison and reporting.
//!
//! Runs every tour strategy on one problem, ranks the results by cost,
//! and aggregates repeated stochastic runs. A strategy that degrades to
//! its sentinel-costed fallback still shows up in the ranking; nothing
//! here aborts the run.

use crate::problem::PlanningProblem;
use crate::strategies::{
    GreedyEdgeStrategy, MstApproximationStrategy, PriorityGreedyStrategy, RandomStrategy,
    TourStrategy,
};
use crate::tour::PlannedTour;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fs::File;
use std::path::Path;

/// Result of one strategy on one problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Strategy name
    pub strategy: String,
    /// Total tour cost in km (sentinel-inflated when hops were
    /// unreachable)
    pub cost: f64,
    /// Number of stops including both HQ endpoints
    pub stops: usize,
    /// Whether every hop was reachable
    pub reachable: bool,
    /// Computation time in seconds
    pub time: f64,
}

impl StrategyResult {
    fn from_tour(tour: &PlannedTour) -> Self {
        StrategyResult {
            strategy: tour.strategy.clone(),
            cost: tour.cost,
            stops: tour.tour.len(),
            reachable: tour.is_reachable(),
            time: tour.computation_time,
        }
    }
}

/// All strategy results for one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// When the comparison ran (RFC 3339)
    pub timestamp: String,
    pub num_deliveries: usize,
    pub results: Vec<StrategyResult>,
    /// Full tours, index-aligned with `results`
    pub tours: Vec<PlannedTour>,
}

impl ComparisonReport {
    /// Results sorted best-first by cost.
    pub fn ranked(&self) -> Vec<&StrategyResult> {
        let mut ranked: Vec<&StrategyResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        ranked
    }

    /// The cheapest result, if any strategy ran.
    pub fn best(&self) -> Option<&StrategyResult> {
        self.results
            .iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
    }

    /// Write one row per strategy to a CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let file = File::create(&path).map_err(|e| format!("Cannot create CSV file: {}", e))?;
        let mut writer = csv::Writer::from_writer(file);
        for result in self.ranked() {
            writer
                .serialize(result)
                .map_err(|e| format!("CSV write error: {}", e))?;
        }
        writer
            .flush()
            .map_err(|e| format!("CSV flush error: {}", e))?;
        Ok(())
    }
}

/// Run all four strategies sequentially on the problem.
///
/// `seed` feeds the random baseline so whole comparisons are
/// reproducible.
pub fn run_all(problem: &PlanningProblem, seed: u64) -> ComparisonReport {
    let strategies: Vec<Box<dyn TourStrategy>> = vec![
        Box::new(RandomStrategy::new(seed)),
        Box::new(MstApproximationStrategy::new()),
        Box::new(PriorityGreedyStrategy::new()),
        Box::new(GreedyEdgeStrategy::new()),
    ];

    let mut results = Vec::with_capacity(strategies.len());
    let mut tours = Vec::with_capacity(strategies.len());
    for strategy in &strategies {
        let tour = strategy.plan(problem);
        log::info!(
            "{}: cost {:.2} km in {:.4}s",
            tour.strategy,
            tour.cost,
            tour.computation_time
        );
        results.push(StrategyResult::from_tour(&tour));
        tours.push(tour);
    }

    ComparisonReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        num_deliveries: problem.num_deliveries(),
        results,
        tours,
    }
}

/// Cost statistics over repeated runs of the random baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomRunStatistics {
    pub runs: usize,
    pub mean_cost: f64,
    pub best_cost: f64,
    pub worst_cost: f64,
    pub std_cost: f64,
}

/// Re-run the random baseline `runs` times with distinct seeds derived
/// from `seed` and summarize the cost spread.
pub fn random_run_statistics(
    problem: &PlanningProblem,
    runs: usize,
    seed: u64,
) -> RandomRunStatistics {
    let costs: Vec<f64> = (0..runs)
        .map(|i| {
            RandomStrategy::new(seed.wrapping_add(i as u64))
                .plan(problem)
                .cost
        })
        .collect();

    RandomRunStatistics {
        runs,
        mean_cost: costs.iter().mean(),
        best_cost: costs.iter().copied().fold(f64::INFINITY, f64::min),
        worst_cost: costs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        std_cost: if runs > 1 { costs.iter().std_dev() } else { 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DistanceMatrix;
    use crate::priority::PriorityMap;

    fn line_problem() -> PlanningProblem {
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
    fn test_all_strategies_present() {
        let report = run_all(&line_problem(), 42);
        assert_eq!(report.results.len(), 4);
        let names: Vec<&str> = report.results.iter().map(|r| r.strategy.as_str()).collect();
        assert!(names.contains(&"Random"));
        assert!(names.contains(&"MST"));
        assert!(names.contains(&"PriorityGreedy"));
        assert!(names.contains(&"GreedyEdge"));
    }

    #[test]
    fn test_ranking_is_sorted() {
        let report = run_all(&line_problem(), 42);
        let ranked = report.ranked();
        for pair in ranked.windows(2) {
            assert!(pair[0].cost <= pair[1].cost);
        }
        assert_eq!(report.best().unwrap().cost, ranked[0].cost);
    }

    #[test]
    fn test_every_tour_is_structurally_valid() {
        let problem = line_problem();
        let report = run_all(&problem, 42);
        for tour in &report.tours {
            assert!(tour.is_complete(problem.hq, &problem.deliveries));
        }
    }

    #[test]
    fn test_random_run_statistics() {
        let problem = line_problem();
        let stats = random_run_statistics(&problem, 10, 1);
        assert_eq!(stats.runs, 10);
        assert!(stats.best_cost <= stats.mean_cost);
        assert!(stats.mean_cost <= stats.worst_cost);
        assert!(stats.std_cost >= 0.0);
    }
}
