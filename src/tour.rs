//! Tour representation and cost evaluation.
//!
//! A tour is a closed walk: HQ first, HQ last, every delivery node exactly
//! once in between. Costs are summed from a [`DistanceSource`] with the
//! unreachable sentinel substituted for missing pairs, so evaluation is
//! total and never panics.

use crate::matrix::{DistanceMatrix, UNREACHABLE_DISTANCE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Anything that can answer a distance query for an ordered node pair.
///
/// Implementations return [`UNREACHABLE_DISTANCE`] for pairs they do not
/// know, keeping downstream arithmetic finite.
pub trait DistanceSource {
    fn distance(&self, u: i64, v: i64) -> f64;
}

impl DistanceSource for DistanceMatrix {
    fn distance(&self, u: i64, v: i64) -> f64 {
        self.get(u, v)
    }
}

/// Sum of consecutive-pair distances along `tour`.
///
/// Order-sensitive and non-negative for non-negative weights; a tour with
/// fewer than two stops costs nothing.
pub fn tour_cost<D: DistanceSource + ?Sized>(distances: &D, tour: &[i64]) -> f64 {
    tour.windows(2).map(|w| distances.distance(w[0], w[1])).sum()
}

/// A tour produced by one strategy, immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedTour {
    /// Visit order, HQ-first and HQ-last.
    pub tour: Vec<i64>,
    /// Total travel distance; sentinel-inflated when any hop was
    /// unreachable.
    pub cost: f64,
    /// Strategy that produced this tour.
    pub strategy: String,
    /// Computation time in seconds.
    pub computation_time: f64,
}

impl PlannedTour {
    /// Evaluate `tour` against `distances` and wrap it up.
    pub fn from_tour<D: DistanceSource + ?Sized>(
        distances: &D,
        tour: Vec<i64>,
        strategy: &str,
    ) -> Self {
        let cost = tour_cost(distances, &tour);
        PlannedTour {
            tour,
            cost,
            strategy: strategy.to_string(),
            computation_time: 0.0,
        }
    }

    /// Wrap a tour whose cost was already computed elsewhere (e.g. from an
    /// auxiliary complete graph).
    pub fn with_cost(tour: Vec<i64>, cost: f64, strategy: &str) -> Self {
        PlannedTour {
            tour,
            cost,
            strategy: strategy.to_string(),
            computation_time: 0.0,
        }
    }

    /// Fallback for structural failures: a single-node tour at HQ with
    /// sentinel cost, so a failed strategy still ranks instead of aborting
    /// the run.
    pub fn degenerate(hq: i64, strategy: &str) -> Self {
        PlannedTour {
            tour: vec![hq],
            cost: UNREACHABLE_DISTANCE,
            strategy: strategy.to_string(),
            computation_time: 0.0,
        }
    }

    /// First and last stops are HQ.
    pub fn is_closed(&self, hq: i64) -> bool {
        self.tour.first() == Some(&hq) && self.tour.last() == Some(&hq) && self.tour.len() >= 2
    }

    /// Shape invariant: closed at HQ and the interior is exactly the
    /// delivery set, each node once.
    pub fn is_complete(&self, hq: i64, deliveries: &[i64]) -> bool {
        if !self.is_closed(hq) || self.tour.len() != deliveries.len() + 2 {
            return false;
        }
        let interior: HashSet<i64> = self.interior().iter().copied().collect();
        interior.len() == deliveries.len() && deliveries.iter().all(|n| interior.contains(n))
    }

    /// The delivery stops, without the HQ endpoints.
    pub fn interior(&self) -> &[i64] {
        if self.tour.len() < 2 {
            return &[];
        }
        &self.tour[1..self.tour.len() - 1]
    }

    /// Whether the cost was inflated by at least one unreachable hop.
    pub fn is_reachable(&self) -> bool {
        self.cost < UNREACHABLE_DISTANCE
    }
}

impl std::fmt::Display for PlannedTour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour ({})", self.strategy)?;
        writeln!(f, "  Cost: {:.2} km", self.cost)?;
        writeln!(f, "  Stops: {}", self.tour.len())?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        writeln!(f, "  Order: {:?}", self.tour)
    }
}
