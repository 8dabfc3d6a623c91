//! Per-run cache of trip classifications.
//!
//! Each trip is classified exactly once per generation run. Everything that
//! needs a trip's direction or ranks afterwards (stop ordering, labeling,
//! output) reads the cached entry, so all consumers agree on the result.
//!
//! The cache is owned by one splitter and dropped with it. It is never
//! shared between runs or agencies.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::TripId;

use super::{Classification, SplitError};

/// Classifications keyed by trip id.
#[derive(Debug, Default)]
pub struct RankCache {
    entries: HashMap<TripId, Classification>,
    computed: usize,
}

impl RankCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached classification.
    pub fn get(&self, trip: &TripId) -> Option<&Classification> {
        self.entries.get(trip)
    }

    /// Get the cached classification, computing it on first request.
    ///
    /// A failed computation leaves the cache unchanged.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        trip: &TripId,
        compute: F,
    ) -> Result<&Classification, SplitError>
    where
        F: FnOnce() -> Result<Classification, SplitError>,
    {
        match self.entries.entry(trip.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let classification = compute()?;
                self.computed += 1;
                Ok(entry.insert(classification))
            }
        }
    }

    /// Number of cached trips.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of classifications actually computed.
    pub fn computed(&self) -> usize {
        self.computed
    }
}
