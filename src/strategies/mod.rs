//! Tour construction strategies.
//!
//! Each strategy consumes a read-only [`PlanningProblem`] and produces a
//! fresh [`PlannedTour`]. Strategies never fail: structural problems
//! degrade to a sentinel-costed degenerate tour so every strategy can
//! always be ranked against the others.

pub mod greedy_edge;
pub mod mst;
pub mod priority_greedy;
pub mod random;

pub use greedy_edge::GreedyEdgeStrategy;
pub use mst::MstApproximationStrategy;
pub use priority_greedy::PriorityGreedyStrategy;
pub use random::RandomStrategy;

use crate::problem::PlanningProblem;
use crate::tour::PlannedTour;

pub trait TourStrategy {
    fn plan(&self, problem: &PlanningProblem) -> PlannedTour;
    fn name(&self) -> &str;
}
