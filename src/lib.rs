//! Delivery Tour Planner Library
//!
//! Plans delivery tours over a road-network graph: one fixed HQ node, a
//! set of delivery nodes, and a closed tour that visits every delivery
//! exactly once.
//!
//! # Features
//!
//! - Road graph loading with weight-attribute resolution and unit
//!   normalization
//! - All-pairs shortest-path distance matrix (Dijkstra, parallel
//!   per-source)
//! - Four tour construction strategies: random baseline, MST
//!   2-approximation, priority-weighted greedy, greedy-edge TSP
//! - Sentinel-protected cost evaluation that stays total on disconnected
//!   graphs
//! - Strategy comparison with ranking and CSV export
//!
//! # Example
//!
//! ```
//! use tour_planner::graph::RoadGraph;
//! use tour_planner::priority::PriorityMap;
//! use tour_planner::problem::PlanningProblem;
//! use tour_planner::strategies::{MstApproximationStrategy, TourStrategy};
//!
//! let graph = RoadGraph::from_parts(&[], &[(1, 2, 1.0), (2, 3, 1.0), (1, 3, 2.5)]);
//! let priorities = PriorityMap::random(&[2, 3], 42);
//! let problem = PlanningProblem::from_graph(&graph, 1, vec![2, 3], priorities).unwrap();
//!
//! let tour = MstApproximationStrategy::new().plan(&problem);
//! assert!(tour.is_complete(1, &[2, 3]));
//! println!("Tour cost: {:.2} km", tour.cost);
//! ```

pub mod compare;
pub mod graph;
pub mod matrix;
pub mod priority;
pub mod problem;
pub mod strategies;
pub mod tour;

pub use graph::RoadGraph;
pub use matrix::{DistanceMatrix, UNREACHABLE_DISTANCE};
pub use priority::PriorityMap;
pub use problem::PlanningProblem;
pub use tour::PlannedTour;
