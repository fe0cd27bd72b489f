//! Greedy-edge TSP strategy.
//!
//! Builds the complete auxiliary graph over {HQ} ∪ deliveries with
//! shortest-path weights, then grows a Hamiltonian cycle edge by edge:
//! always take the cheapest remaining edge that keeps every vertex at
//! degree ≤ 2 and closes no cycle before all nodes are linked. The only
//! strategy here that approximates TSP structure directly rather than
//! through a spanning-tree surrogate, and the most expensive one: the
//! auxiliary graph alone is O(n²) pairs.

use crate::problem::PlanningProblem;
use crate::strategies::TourStrategy;
use crate::tour::PlannedTour;
use ordered_float::OrderedFloat;
use petgraph::unionfind::UnionFind;

pub struct GreedyEdgeStrategy;

impl GreedyEdgeStrategy {
    pub fn new() -> Self {
        GreedyEdgeStrategy
    }
}

impl Default for GreedyEdgeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl TourStrategy for GreedyEdgeStrategy {
    fn plan(&self, problem: &PlanningProblem) -> PlannedTour {
        let start = std::time::Instant::now();

        if problem.deliveries.is_empty() {
            let mut tour = PlannedTour::degenerate(problem.hq, self.name());
            tour.computation_time = start.elapsed().as_secs_f64();
            return tour;
        }

        let mut nodes = Vec::with_capacity(problem.deliveries.len() + 1);
        nodes.push(problem.hq);
        nodes.extend_from_slice(&problem.deliveries);
        let n = nodes.len();

        // Auxiliary complete graph, dense by local index. Tour cost is
        // recomputed from these weights at the end, never from fresh
        // shortest-path queries.
        let mut weight = vec![vec![0.0f64; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = problem.matrix.get(nodes[i], nodes[j]);
                weight[i][j] = d;
                weight[j][i] = d;
            }
        }

        if n == 2 {
            // A single delivery admits no proper cycle; the out-and-back
            // walk is the whole answer.
            let tour = vec![nodes[0], nodes[1], nodes[0]];
            let cost = 2.0 * weight[0][1];
            let mut planned = PlannedTour::with_cost(tour, cost, self.name());
            planned.computation_time = start.elapsed().as_secs_f64();
            return planned;
        }

        let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push((i, j));
            }
        }
        pairs.sort_by_key(|&(i, j)| OrderedFloat(weight[i][j]));

        let mut uf = UnionFind::<usize>::new(n);
        let mut degree = vec![0u8; n];
        let mut adjacent: Vec<Vec<usize>> = vec![Vec::with_capacity(2); n];
        let mut added = 0usize;

        for &(i, j) in &pairs {
            if degree[i] >= 2 || degree[j] >= 2 {
                continue;
            }
            // Joining two nodes of one component closes a cycle; that is
            // only allowed for the final edge that completes the tour.
            if uf.find(i) == uf.find(j) && added != n - 1 {
                continue;
            }
            uf.union(i, j);
            adjacent[i].push(j);
            adjacent[j].push(i);
            degree[i] += 1;
            degree[j] += 1;
            added += 1;
            if added == n {
                break;
            }
        }

        if added != n {
            let mut fallback = PlannedTour::degenerate(problem.hq, self.name());
            fallback.computation_time = start.elapsed().as_secs_f64();
            return fallback;
        }

        // Walk the cycle starting at HQ (local index 0).
        let mut tour = Vec::with_capacity(n + 1);
        let mut cost = 0.0;
        tour.push(nodes[0]);
        let mut prev = usize::MAX;
        let mut current = 0usize;
        loop {
            let Some(&next) = adjacent[current].iter().find(|&&x| x != prev) else {
                break;
            };
            cost += weight[current][next];
            prev = current;
            current = next;
            if current == 0 {
                break;
            }
            tour.push(nodes[current]);
        }
        tour.push(nodes[0]);

        if tour.len() != n + 1 {
            let mut fallback = PlannedTour::degenerate(problem.hq, self.name());
            fallback.computation_time = start.elapsed().as_secs_f64();
            return fallback;
        }

        let mut planned = PlannedTour::with_cost(tour, cost, self.name());
        planned.computation_time = start.elapsed().as_secs_f64();
        planned
    }

    fn name(&self) -> &str {
        "GreedyEdge"
    }
}
