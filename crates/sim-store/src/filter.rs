use regex::Regex;
use sim_types::{Pair, SimulationDocument};

use crate::error::{StoreError, StoreResult};

/// Selects pairs by matching a regex against `destination + path`.
#[derive(Clone, Debug)]
pub struct UrlFilter {
    pattern: Regex,
}

impl UrlFilter {
    pub fn compile(pattern: &str) -> StoreResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| StoreError::InvalidFilter {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, pair: &Pair) -> bool {
        self.pattern.is_match(&pair.request.url())
    }

    /// Copy of `document` keeping only matching pairs, in order.
    pub fn apply(&self, document: &SimulationDocument) -> SimulationDocument {
        let pairs = document
            .pairs()
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        document.replace_pairs(pairs)
    }
}
