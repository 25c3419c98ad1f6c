//! Per-criterion weights used by the summary aggregation.
//!
//! Weights are integers in `[0, 10]`, default 5. An unset weight reads as 5
//! but is only materialized once the user touches it or a JD parse
//! initializes defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::coverage::criteria::{CriterionKey, ParsedJobDescription};

pub const DEFAULT_WEIGHT: u8 = 5;
pub const MAX_WEIGHT: u8 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightSet {
    weights: HashMap<CriterionKey, u8>,
}

impl WeightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective weight for a criterion. Unset keys read as the default;
    /// an explicit 0 stays 0.
    pub fn get(&self, key: CriterionKey) -> u8 {
        self.weights.get(&key).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Applies a delta, clamping the result to `[0, MAX_WEIGHT]` regardless
    /// of delta magnitude or starting value. Returns the new weight.
    pub fn adjust(&mut self, key: CriterionKey, delta: i32) -> u8 {
        // Widened so extreme deltas clamp instead of overflowing.
        let next = (i64::from(self.get(key)) + i64::from(delta))
            .clamp(0, i64::from(MAX_WEIGHT)) as u8;
        self.weights.insert(key, next);
        next
    }

    /// Initializes any criterion of the parsed JD that has no weight yet to
    /// the default. Existing weights are left untouched.
    pub fn ensure_defaults(&mut self, parsed: &ParsedJobDescription) {
        for key in parsed.keys() {
            self.weights.entry(key).or_insert(DEFAULT_WEIGHT);
        }
    }

    /// Resets every criterion of the parsed JD back to the default weight.
    pub fn reset(&mut self, parsed: &ParsedJobDescription) {
        self.weights = parsed.keys().map(|k| (k, DEFAULT_WEIGHT)).collect();
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
