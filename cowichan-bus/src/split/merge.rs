//! Headsign merge allow-list.
//!
//! When two trips of a route turn out to run the same direction under
//! different destination text, the pair must be listed here with the label
//! to use. Anything not listed is a gap in the table and stops the run.

use std::collections::HashMap;

use crate::domain::RouteId;

use super::SplitError;

/// Explicit per-route rules for merging pairs of headsigns.
#[derive(Debug, Clone, Default)]
pub struct MergePolicy {
    /// (route, lower label, higher label) → merged label
    rules: HashMap<(RouteId, String, String), String>,
}

impl MergePolicy {
    /// Create an empty policy, which rejects every merge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `a` and `b` on `route` to merge into `merged`.
    ///
    /// The pair is unordered.
    pub fn allow(mut self, route: &str, a: &str, b: &str, merged: &str) -> Self {
        self.rules.insert(key(&RouteId::new(route), a, b), merged.to_string());
        self
    }

    /// Merge two headsigns of the same route and direction.
    ///
    /// Identical labels need no rule.
    pub fn merge(&self, route: &RouteId, a: &str, b: &str) -> Result<String, SplitError> {
        if a == b {
            return Ok(a.to_string());
        }
        self.rules
            .get(&key(route, a, b))
            .cloned()
            .ok_or_else(|| SplitError::UnmappedMerge {
                route: route.clone(),
                first: a.to_string(),
                second: b.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn key(route: &RouteId, a: &str, b: &str) -> (RouteId, String, String) {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    (route.clone(), lo.to_string(), hi.to_string())
}

/// Merge rules for Cowichan Valley routes.
pub fn cowichan_valley_merges() -> MergePolicy {
    MergePolicy::new().allow("4", "East", "Maple Bay", "Maple Bay")
}
