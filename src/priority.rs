//! Delivery priorities.
//!
//! Every delivery node carries an integer priority in `[1, 10]`; HQ is
//! fixed at 0 and never scored. Out-of-range values are rejected here, at
//! the boundary, before any strategy sees them.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 10;

/// Mapping from delivery node id to its priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityMap {
    priorities: HashMap<i64, u8>,
}

impl PriorityMap {
    /// Validate and wrap an explicit priority assignment.
    pub fn new(priorities: HashMap<i64, u8>) -> Result<Self, String> {
        for (&node, &priority) in &priorities {
            if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
                return Err(format!(
                    "Priority {} for node {} is outside [{}, {}]",
                    priority, node, MIN_PRIORITY, MAX_PRIORITY
                ));
            }
        }
        Ok(PriorityMap { priorities })
    }

    /// Assign uniform random priorities in `[1, 10]` to the given nodes.
    /// Deterministic via seed.
    pub fn random(nodes: &[i64], seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let priorities = nodes
            .iter()
            .map(|&node| (node, rng.gen_range(MIN_PRIORITY..=MAX_PRIORITY)))
            .collect();
        PriorityMap { priorities }
    }

    /// Load priorities from a JSON object of node id to priority.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let file = File::open(&path).map_err(|e| format!("Cannot open priority file: {}", e))?;
        let reader = BufReader::new(file);
        let priorities: HashMap<i64, u8> = serde_json::from_reader(reader)
            .map_err(|e| format!("Invalid priority file: {}", e))?;
        Self::new(priorities)
    }

    /// Priority of a node; nodes outside the map (HQ included) are 0.
    pub fn priority(&self, node: i64) -> u8 {
        self.priorities.get(&node).copied().unwrap_or(0)
    }

    pub fn get(&self, node: i64) -> Option<u8> {
        self.priorities.get(&node).copied()
    }

    /// Whether every node in `nodes` has an assigned priority.
    pub fn covers(&self, nodes: &[i64]) -> bool {
        nodes.iter().all(|n| self.priorities.contains_key(n))
    }

    pub fn len(&self) -> usize {
        self.priorities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty()
    }
}
