//! Direction classification for a single trip.

use std::cmp::Ordering;

use tracing::trace;

use crate::domain::{DirectionTag, ObservedTrip};
use crate::pattern::RouteSpec;

use super::{RankMap, Score, SplitConfig, SplitError, align};

/// The winning direction for one trip, with the ranks from its alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Tag of the winning pattern
    pub tag: DirectionTag,
    /// Score against the winning pattern
    pub score: Score,
    /// Score against the other pattern
    pub runner_up: Score,
    /// Ranks from the winning alignment
    pub ranks: RankMap,
}

/// Decide which of the route's two patterns a trip follows.
///
/// Both patterns are aligned and the higher score wins. An exact tie means
/// the patterns cannot tell this trip apart, which is a defect in the
/// pattern table: it is reported as [`SplitError::AmbiguousPattern`]
/// instead of guessing.
pub fn classify(
    trip: &ObservedTrip,
    spec: &RouteSpec,
    config: &SplitConfig,
) -> Result<Classification, SplitError> {
    let observed = trip.stop_ids();
    let [first, second] = spec.patterns();

    let first_alignment = align(&observed, first, config);
    let second_alignment = align(&observed, second, config);

    let (tag, winner, runner_up) = match first_alignment.score.cmp(&second_alignment.score) {
        Ordering::Greater => (first.tag(), first_alignment, second_alignment.score),
        Ordering::Less => (second.tag(), second_alignment, first_alignment.score),
        Ordering::Equal => {
            return Err(SplitError::AmbiguousPattern {
                route: spec.route_id().clone(),
                trip: trip.id.clone(),
                first: first.tag(),
                second: second.tag(),
                score: first_alignment.score,
            });
        }
    };

    trace!(
        route = %spec.route_id(),
        trip = %trip.id,
        direction = %tag,
        score = %winner.score,
        runner_up = %runner_up,
        "Classified trip"
    );

    Ok(Classification {
        tag,
        score: winner.score,
        runner_up,
        ranks: winner.ranks,
    })
}
