//! Splitting a route's trips into its two directions.

use tracing::{debug, warn};

use crate::domain::{DirectionTag, ObservedTrip, RouteId};
use crate::pattern::RouteSpec;

use super::{Classification, RankCache, SplitConfig, SplitError, TripContext, classify};

/// The trips of one route classified into one direction.
///
/// Not present in the feed: the splitter builds one per pattern, even if no
/// trip ends up in it.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticTrip {
    pub tag: DirectionTag,
    /// Normalized destination text
    pub label: String,
    /// Member trips, in input order
    pub trips: Vec<ObservedTrip>,
}

impl SyntheticTrip {
    pub fn new(tag: DirectionTag, label: String) -> Self {
        Self {
            tag,
            label,
            trips: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Both directions of a split route, in pattern order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSplit {
    pub route_id: RouteId,
    pub directions: [SyntheticTrip; 2],
}

/// Counters for one run, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    pub routes: usize,
    pub trips: usize,
    pub classifications: usize,
}

/// Splits routes into directions for one generation run.
///
/// Owns the run's classification cache. Create a fresh splitter for every
/// feed import; classifications never carry over between runs.
#[derive(Debug)]
pub struct TripSplitter {
    config: SplitConfig,
    cache: RankCache,
    routes: usize,
}

impl TripSplitter {
    pub fn new(config: SplitConfig) -> Self {
        Self {
            config,
            cache: RankCache::new(),
            routes: 0,
        }
    }

    /// Classify a trip, or return the cached result from earlier in the run.
    pub fn classify(
        &mut self,
        trip: &ObservedTrip,
        spec: &RouteSpec,
    ) -> Result<&Classification, SplitError> {
        let config = &self.config;
        self.cache
            .get_or_try_insert_with(&trip.id, || classify(trip, spec, config))
    }

    /// Split a route's trips into its two synthetic trips.
    ///
    /// `normalize` renders each pattern's destination label into display
    /// text. The first classification error aborts the split, as does a
    /// cached classification whose tag names neither of the route's
    /// patterns.
    pub fn split<F>(
        &mut self,
        spec: &RouteSpec,
        trips: Vec<ObservedTrip>,
        normalize: F,
    ) -> Result<RouteSplit, SplitError>
    where
        F: Fn(&str) -> String,
    {
        let [first, second] = spec.patterns();
        let mut directions = [
            SyntheticTrip::new(first.tag(), normalize(first.label())),
            SyntheticTrip::new(second.tag(), normalize(second.label())),
        ];

        for trip in trips {
            let tag = self.classify(&trip, spec)?.tag;
            let slot = match tag {
                t if t == first.tag() => 0,
                t if t == second.tag() => 1,
                t => {
                    return Err(SplitError::ConfigurationGap {
                        route: spec.route_id().clone(),
                        reason: format!(
                            "trip {} is classified {t}, not {} or {}",
                            trip.id,
                            first.tag(),
                            second.tag()
                        ),
                    });
                }
            };
            directions[slot].trips.push(trip);
        }

        for direction in &directions {
            if direction.is_empty() {
                warn!(
                    route = %spec.route_id(),
                    direction = %direction.tag,
                    "No trips classified into direction"
                );
            }
        }

        debug!(
            route = %spec.route_id(),
            first = directions[0].len(),
            second = directions[1].len(),
            "Split route"
        );
        self.routes += 1;

        Ok(RouteSplit {
            route_id: spec.route_id().clone(),
            directions,
        })
    }

    /// Ordering context for a classified trip.
    pub fn context<'a>(&'a self, trip: &'a ObservedTrip) -> Option<TripContext<'a>> {
        self.cache
            .get(&trip.id)
            .map(|c| TripContext::new(trip, &c.ranks))
    }

    pub fn stats(&self) -> SplitStats {
        SplitStats {
            routes: self.routes,
            trips: self.cache.entry_count(),
            classifications: self.cache.computed(),
        }
    }
}

impl Default for TripSplitter {
    fn default() -> Self {
        Self::new(SplitConfig::default())
    }
}
