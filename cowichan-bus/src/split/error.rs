//! Splitter error types.
//!
//! Every variant points at a defect in the hand-curated tables rather than a
//! transient condition. A generation run stops at the first one.

use crate::domain::{DirectionTag, RouteId, TripId};

use super::Score;

/// Errors raised while classifying, merging or looking up agency data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    /// Both canonical patterns scored exactly the same for one trip
    #[error(
        "route {route}: trip {trip} is ambiguous, {first} and {second} both score {score}"
    )]
    AmbiguousPattern {
        route: RouteId,
        trip: TripId,
        first: DirectionTag,
        second: DirectionTag,
        score: Score,
    },

    /// Two headsigns need merging but no rule covers the pair
    #[error("route {route}: no merge rule for headsigns {first:?} and {second:?}")]
    UnmappedMerge {
        route: RouteId,
        first: String,
        second: String,
    },

    /// A route spec is malformed
    #[error("route {route}: configuration gap: {reason}")]
    ConfigurationGap { route: RouteId, reason: String },

    /// A static agency table has no entry for the key
    #[error("no {table} entry for {key}")]
    UnmappedLookup { table: &'static str, key: String },
}

impl SplitError {
    /// Returns the route the error is about, if any.
    pub fn route(&self) -> Option<&RouteId> {
        match self {
            SplitError::AmbiguousPattern { route, .. }
            | SplitError::UnmappedMerge { route, .. }
            | SplitError::ConfigurationGap { route, .. } => Some(route),
            SplitError::UnmappedLookup { .. } => None,
        }
    }
}
