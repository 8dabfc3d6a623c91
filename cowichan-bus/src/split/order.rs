//! Stop ordering within a classified trip.
//!
//! Visits are ordered by:
//! 1. Canonical rank, when both visits have one
//! 2. Ranked visits before unranked ones
//! 3. Feed stop sequence
//! 4. Scheduled arrival (untimed last)
//! 5. Stop id, then visit index
//!
//! The last step makes this a strict total order: only a visit compared with
//! itself is `Equal`.

use std::cmp::Ordering;

use crate::domain::{FeedTime, ObservedTrip, StopIndex, StopTime};

use super::{Rank, RankMap};

/// A trip together with the ranks it was classified with.
#[derive(Debug, Clone, Copy)]
pub struct TripContext<'a> {
    trip: &'a ObservedTrip,
    ranks: &'a RankMap,
}

impl<'a> TripContext<'a> {
    pub fn new(trip: &'a ObservedTrip, ranks: &'a RankMap) -> Self {
        Self { trip, ranks }
    }

    pub fn trip(&self) -> &'a ObservedTrip {
        self.trip
    }

    pub fn rank(&self, idx: StopIndex) -> Option<Rank> {
        self.ranks.get(idx)
    }
}

/// Decide which of two visits of the same trip comes first.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use cowichan_bus::domain::{ObservedTrip, RouteId, StopId, StopIndex, StopTime, TripId};
/// use cowichan_bus::split::{RankMap, TripContext, compare_early};
///
/// let trip = ObservedTrip::new(
///     TripId::new("t1"),
///     RouteId::new("8"),
///     vec![
///         StopTime::new(StopId::parse("104033").unwrap(), 2),
///         StopTime::new(StopId::parse("108060").unwrap(), 1),
///     ],
/// );
///
/// // Without ranks the feed sequence decides
/// let ranks = RankMap::new();
/// let ctx = TripContext::new(&trip, &ranks);
/// assert_eq!(compare_early(&ctx, StopIndex(0), StopIndex(1)), Ordering::Greater);
/// ```
pub fn compare_early(ctx: &TripContext<'_>, a: StopIndex, b: StopIndex) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let by_rank = match (ctx.rank(a), ctx.rank(b)) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    let visit_a = ctx.trip.get(a);
    let visit_b = ctx.trip.get(b);

    by_rank
        .then_with(|| sequence_key(visit_a).cmp(&sequence_key(visit_b)))
        .then_with(|| arrival_key(visit_a).cmp(&arrival_key(visit_b)))
        .then_with(|| {
            let stop_a = visit_a.map(|v| &v.stop_id);
            let stop_b = visit_b.map(|v| &v.stop_id);
            stop_a.cmp(&stop_b)
        })
        .then_with(|| a.cmp(&b))
}

/// All visits of the trip, sorted with [`compare_early`].
pub fn ordered_stops(ctx: &TripContext<'_>) -> Vec<StopIndex> {
    let mut indices: Vec<StopIndex> = (0..ctx.trip.len()).map(StopIndex).collect();
    indices.sort_by(|a, b| compare_early(ctx, *a, *b));
    indices
}

// Missing visits sort after every real one.
fn sequence_key(visit: Option<&StopTime>) -> (bool, u32) {
    match visit {
        Some(v) => (false, v.stop_sequence),
        None => (true, 0),
    }
}

fn arrival_key(visit: Option<&StopTime>) -> (bool, Option<FeedTime>) {
    let arrival = visit.and_then(|v| v.arrival);
    (arrival.is_none(), arrival)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DirectionTag, RouteId, StopId, TripId};
    use crate::pattern::{CanonicalPattern, PatternElement};
    use crate::split::{SplitConfig, align};

    fn stop(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn time(s: &str) -> FeedTime {
        FeedTime::parse_hms(s).unwrap()
    }

    fn trip_of(visits: Vec<StopTime>) -> ObservedTrip {
        ObservedTrip::new(TripId::new("t"), RouteId::new("8"), visits)
    }

    fn ranks_for(trip: &ObservedTrip, elements: Vec<PatternElement>) -> RankMap {
        let pattern = CanonicalPattern::new(DirectionTag::SOUTH, "Mill Bay", elements);
        align(&trip.stop_ids(), &pattern, &SplitConfig::default()).ranks
    }

    #[test]
    fn ranked_compare_by_rank() {
        let trip = trip_of(vec![
            StopTime::new(stop("104033"), 1),
            StopTime::new(stop("136373"), 2),
            StopTime::new(stop("108060"), 3),
        ]);
        let ranks = ranks_for(
            &trip,
            vec![
                PatternElement::Required(stop("104033")),
                PatternElement::Required(stop("108060")),
            ],
        );
        let ctx = TripContext::new(&trip, &ranks);

        assert_eq!(compare_early(&ctx, StopIndex(0), StopIndex(2)), Ordering::Less);
        assert_eq!(
            compare_early(&ctx, StopIndex(2), StopIndex(0)),
            Ordering::Greater
        );
    }

    #[test]
    fn ranked_before_unranked() {
        let trip = trip_of(vec![
            StopTime::new(stop("X"), 1),
            StopTime::new(stop("A"), 2),
        ]);
        let ranks = ranks_for(&trip, vec![PatternElement::Required(stop("A"))]);
        let ctx = TripContext::new(&trip, &ranks);

        // Unranked X has the lower feed sequence but still sorts after A
        assert_eq!(
            compare_early(&ctx, StopIndex(0), StopIndex(1)),
            Ordering::Greater
        );
        assert_eq!(ordered_stops(&ctx), vec![StopIndex(1), StopIndex(0)]);
    }

    #[test]
    fn unranked_fall_back_to_sequence() {
        let trip = trip_of(vec![
            StopTime::new(stop("B"), 20),
            StopTime::new(stop("A"), 10),
        ]);
        let ranks = RankMap::new();
        let ctx = TripContext::new(&trip, &ranks);
        assert_eq!(ordered_stops(&ctx), vec![StopIndex(1), StopIndex(0)]);
    }

    #[test]
    fn same_sequence_falls_back_to_arrival() {
        let trip = trip_of(vec![
            StopTime::timed(stop("B"), 1, time("08:10:00")),
            StopTime::timed(stop("A"), 1, time("08:05:00")),
            StopTime::new(stop("C"), 1),
        ]);
        let ranks = RankMap::new();
        let ctx = TripContext::new(&trip, &ranks);
        assert_eq!(
            ordered_stops(&ctx),
            vec![StopIndex(1), StopIndex(0), StopIndex(2)]
        );
    }

    #[test]
    fn full_tie_broken_by_stop_then_index() {
        let trip = trip_of(vec![
            StopTime::new(stop("B"), 1),
            StopTime::new(stop("A"), 1),
            StopTime::new(stop("A"), 1),
        ]);
        let ranks = RankMap::new();
        let ctx = TripContext::new(&trip, &ranks);

        assert_eq!(
            ordered_stops(&ctx),
            vec![StopIndex(1), StopIndex(2), StopIndex(0)]
        );
        assert_eq!(compare_early(&ctx, StopIndex(1), StopIndex(2)), Ordering::Less);
        assert_eq!(compare_early(&ctx, StopIndex(2), StopIndex(2)), Ordering::Equal);
    }

    #[test]
    fn loop_return_sorts_last() {
        let trip = trip_of(vec![
            StopTime::new(stop("A"), 1),
            StopTime::new(stop("L"), 2),
            StopTime::new(stop("B"), 3),
            StopTime::new(stop("L"), 4),
        ]);
        let ranks = ranks_for(
            &trip,
            vec![
                PatternElement::Required(stop("A")),
                PatternElement::Loop(stop("L")),
                PatternElement::Required(stop("B")),
            ],
        );
        let ctx = TripContext::new(&trip, &ranks);
        assert_eq!(
            ordered_stops(&ctx),
            vec![StopIndex(0), StopIndex(1), StopIndex(2), StopIndex(3)]
        );
    }

    #[test]
    fn out_of_range_index_sorts_last() {
        let trip = trip_of(vec![StopTime::new(stop("A"), 1)]);
        let ranks = RankMap::new();
        let ctx = TripContext::new(&trip, &ranks);
        assert_eq!(compare_early(&ctx, StopIndex(0), StopIndex(5)), Ordering::Less);
    }
}
