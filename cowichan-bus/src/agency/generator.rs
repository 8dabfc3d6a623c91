//! One generation run over a loaded feed.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::domain::{DirectionTag, ObservedTrip, RouteId, StopId};
use crate::feed::Feed;
use crate::pattern::{PatternRegistry, RouteSpec, cowichan_valley};
use crate::report::{AgencyOutput, DirectionOutput, RouteOutput, StopOutput, TripOutput};
use crate::split::{
    MergePolicy, RankMap, SplitConfig, SplitError, TripContext, TripSplitter,
    cowichan_valley_merges, ordered_stops,
};

use super::{AGENCY_COLOR, AGENCY_ID, clean_stop_name, clean_trip_headsign, route_color};

/// Direction tags for routes that keep the feed's direction ids.
const FEED_DIRECTIONS: [DirectionTag; 2] = [DirectionTag::new("0"), DirectionTag::new("1")];

/// Cleaned stop names for one run.
type StopNames<'f> = BTreeMap<&'f StopId, String>;

/// Turns a feed into agency output using the route tables.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    agency_id: String,
    registry: &'a PatternRegistry,
    merges: MergePolicy,
    config: SplitConfig,
}

impl Generator<'static> {
    /// Generator for Cowichan Valley with the built-in tables.
    pub fn cowichan_valley(config: SplitConfig) -> Result<Self, SplitError> {
        Ok(Generator::new(
            AGENCY_ID,
            cowichan_valley()?,
            cowichan_valley_merges(),
            config,
        ))
    }
}

impl<'a> Generator<'a> {
    pub fn new(
        agency_id: &str,
        registry: &'a PatternRegistry,
        merges: MergePolicy,
        config: SplitConfig,
    ) -> Self {
        Self {
            agency_id: agency_id.to_string(),
            registry,
            merges,
            config,
        }
    }

    /// Process every route of the agency.
    ///
    /// Each run starts from an empty classification cache. The first error
    /// aborts the run.
    pub fn run(&self, feed: &Feed) -> Result<AgencyOutput, SplitError> {
        let mut splitter = TripSplitter::new(self.config.clone());
        let mut routes = Vec::new();
        let names: StopNames<'_> = feed
            .stops
            .iter()
            .map(|(id, name)| (id, clean_stop_name(name)))
            .collect();

        for route in feed.routes.values() {
            if route.agency_id.as_deref() != Some(self.agency_id.as_str()) {
                continue;
            }
            let route_id = route.route_id();
            let trips: Vec<ObservedTrip> = feed
                .trips_for(&route.gtfs_id)
                .iter()
                .cloned()
                .map(|mut trip| {
                    trip.route_id = route_id.clone();
                    trip
                })
                .collect();
            if trips.is_empty() {
                debug!(route = %route_id, "Skipping route without trips");
                continue;
            }

            let color = route_color(route)?;
            let spec = self.registry.lookup(&route_id);
            let directions = match spec {
                Some(spec) => split_directions(&mut splitter, spec, trips, &names)?,
                None => self.feed_directions(&route_id, trips, &names)?,
            };

            routes.push(RouteOutput {
                split: spec.is_some(),
                id: route_id,
                long_name: route.long_name.clone(),
                color,
                directions,
            });
        }

        routes.sort_by(|a, b| a.id.cmp(&b.id));
        let stats = splitter.stats();
        info!(
            routes = routes.len(),
            split_routes = stats.routes,
            classified = stats.classifications,
            "Generated agency"
        );

        Ok(AgencyOutput {
            agency_id: self.agency_id.clone(),
            color: AGENCY_COLOR.to_string(),
            routes,
        })
    }

    /// Group trips by feed direction id and label each group.
    ///
    /// Trips without a direction id count as direction 0.
    fn feed_directions(
        &self,
        route_id: &RouteId,
        trips: Vec<ObservedTrip>,
        names: &StopNames<'_>,
    ) -> Result<Vec<DirectionOutput>, SplitError> {
        let mut groups: BTreeMap<u8, Vec<ObservedTrip>> = BTreeMap::new();
        for trip in trips {
            groups
                .entry(trip.direction_id.unwrap_or(0))
                .or_default()
                .push(trip);
        }

        let mut directions = Vec::new();
        for (direction_id, trips) in groups {
            let tag = FEED_DIRECTIONS
                .get(usize::from(direction_id))
                .copied()
                .ok_or_else(|| SplitError::ConfigurationGap {
                    route: route_id.clone(),
                    reason: format!("unexpected feed direction {direction_id}"),
                })?;
            let label = self.merged_label(route_id, &trips)?;
            let empty = RankMap::new();
            let trips = trips
                .iter()
                .map(|trip| trip_output(&TripContext::new(trip, &empty), names))
                .collect();
            directions.push(DirectionOutput {
                tag,
                label,
                trips,
            });
        }
        Ok(directions)
    }

    /// Fold the cleaned headsigns of one direction into a single label.
    fn merged_label(&self, route_id: &RouteId, trips: &[ObservedTrip]) -> Result<String, SplitError> {
        let mut label: Option<String> = None;
        for headsign in trips.iter().filter_map(|t| t.headsign.as_deref()) {
            let cleaned = clean_trip_headsign(headsign);
            label = Some(match label {
                Some(current) => self.merges.merge(route_id, &current, &cleaned)?,
                None => cleaned,
            });
        }
        Ok(label.unwrap_or_default())
    }
}

fn split_directions(
    splitter: &mut TripSplitter,
    spec: &RouteSpec,
    trips: Vec<ObservedTrip>,
    names: &StopNames<'_>,
) -> Result<Vec<DirectionOutput>, SplitError> {
    let split = splitter.split(spec, trips, clean_trip_headsign)?;

    let mut directions = Vec::new();
    for direction in &split.directions {
        let mut trips = Vec::new();
        for trip in &direction.trips {
            let ctx = splitter
                .context(trip)
                .ok_or_else(|| SplitError::ConfigurationGap {
                    route: split.route_id.clone(),
                    reason: format!("trip {} was split without a classification", trip.id),
                })?;
            trips.push(trip_output(&ctx, names));
        }
        directions.push(DirectionOutput {
            tag: direction.tag,
            label: direction.label.clone(),
            trips,
        });
    }
    Ok(directions)
}

fn trip_output(ctx: &TripContext<'_>, names: &StopNames<'_>) -> TripOutput {
    let trip = ctx.trip();
    let stops = ordered_stops(ctx)
        .into_iter()
        .filter_map(|idx| {
            trip.get(idx).map(|st| StopOutput {
                stop_id: st.stop_id.clone(),
                name: names.get(&st.stop_id).cloned(),
                sequence: st.stop_sequence,
                arrival: st.arrival.map(|t| t.to_string()),
                rank: ctx.rank(idx).map(|r| r.0),
            })
        })
        .collect();
    TripOutput {
        id: trip.id.clone(),
        headsign: trip.headsign.clone(),
        stops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StopId, StopTime, TripId};
    use crate::feed::FeedRoute;
    use crate::pattern::PatternBuilder;

    fn feed_route(gtfs_id: &str, agency: &str, short_name: &str) -> FeedRoute {
        FeedRoute {
            gtfs_id: gtfs_id.into(),
            agency_id: Some(agency.into()),
            short_name: Some(short_name.into()),
            long_name: None,
            color: None,
        }
    }

    fn trip(id: &str, gtfs_route: &str, headsign: &str, direction: u8, stops: &[&str]) -> ObservedTrip {
        let stop_times = stops
            .iter()
            .enumerate()
            .map(|(i, s)| StopTime::new(StopId::parse(s).unwrap(), i as u32 + 1))
            .collect();
        let mut trip = ObservedTrip::new(TripId::new(id), RouteId::new(gtfs_route), stop_times);
        trip.headsign = Some(headsign.into());
        trip.direction_id = Some(direction);
        trip
    }

    fn feed(routes: Vec<FeedRoute>, trips: Vec<ObservedTrip>) -> Feed {
        let mut feed = Feed::default();
        for route in routes {
            feed.routes.insert(route.gtfs_id.clone(), route);
        }
        for trip in trips {
            feed.trips
                .entry(trip.route_id.as_str().to_string())
                .or_default()
                .push(trip);
        }
        feed
    }

    fn registry() -> PatternRegistry {
        let mut registry = PatternRegistry::new();
        registry
            .insert(
                RouteSpec::builder("8")
                    .direction(
                        DirectionTag::NORTH,
                        "Duncan",
                        PatternBuilder::new().required("108060").required("104033"),
                    )
                    .direction(
                        DirectionTag::SOUTH,
                        "Mill Bay via Cobble Hill",
                        PatternBuilder::new().required("104033").required("108060"),
                    )
                    .build()
                    .unwrap(),
            )
            .unwrap();
        registry
    }

    #[test]
    fn split_route_orders_stops_by_rank() {
        let registry = registry();
        let generator = Generator::new("10", &registry, MergePolicy::new(), SplitConfig::default());
        let feed = feed(
            vec![feed_route("8-CVX", "10", "8")],
            vec![trip("t1", "8-CVX", "Mill Bay", 0, &["104033", "136373", "108060"])],
        );

        let output = generator.run(&feed).unwrap();
        assert_eq!(output.agency_id, "10");
        assert_eq!(output.color, "34B233");

        let route = &output.routes[0];
        assert_eq!(route.id, RouteId::new("8"));
        assert_eq!(route.color, "49176D");
        assert!(route.split);

        let south = &route.directions[1];
        assert_eq!(south.tag, DirectionTag::SOUTH);
        assert_eq!(south.label, "Mill Bay");
        let stops: Vec<&str> = south.trips[0].stops.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(stops, vec!["104033", "108060", "136373"]);
        assert_eq!(south.trips[0].stops[2].rank, None);
        assert!(route.directions[0].trips.is_empty());
    }

    #[test]
    fn stop_names_are_cleaned() {
        let registry = registry();
        let generator = Generator::new("10", &registry, MergePolicy::new(), SplitConfig::default());
        let mut feed = feed(
            vec![feed_route("8-CVX", "10", "8"), feed_route("4-CVX", "10", "4")],
            vec![
                trip("t1", "8-CVX", "Mill Bay", 0, &["104033", "136373", "108060"]),
                trip("t2", "4-CVX", "Duncan", 0, &["104033"]),
            ],
        );
        for (id, name) in [
            ("104033", "DUNCAN EXCHANGE BAY 1"),
            ("136373", "(-IMPL-)Cowichan Bay at Telegraph Road"),
        ] {
            feed.stops.insert(StopId::parse(id).unwrap(), name.to_string());
        }

        let output = generator.run(&feed).unwrap();

        // Split route, in rank order
        let split = &output.routes[1];
        assert_eq!(split.id, RouteId::new("8"));
        let names: Vec<Option<&str>> = split.directions[1].trips[0]
            .stops
            .iter()
            .map(|s| s.name.as_deref())
            .collect();
        assert_eq!(
            names,
            vec![
                Some("Duncan Exch Bay 1"),
                None,
                Some("Cowichan Bay / Telegraph Rd"),
            ]
        );

        // Feed-direction route
        let generic = &output.routes[0];
        assert_eq!(generic.id, RouteId::new("4"));
        assert_eq!(
            generic.directions[0].trips[0].stops[0].name.as_deref(),
            Some("Duncan Exch Bay 1")
        );
    }

    #[test]
    fn other_agencies_are_ignored() {
        let registry = registry();
        let generator = Generator::new("10", &registry, MergePolicy::new(), SplitConfig::default());
        let feed = feed(
            vec![feed_route("8-VIC", "1", "8")],
            vec![trip("t1", "8-VIC", "Downtown", 0, &["1", "2"])],
        );

        assert!(generator.run(&feed).unwrap().routes.is_empty());
    }

    #[test]
    fn generic_route_merges_headsigns() {
        let registry = PatternRegistry::new();
        let generator = Generator::new("10", &registry, cowichan_valley_merges(), SplitConfig::default());
        let feed = feed(
            vec![feed_route("4-CVX", "10", "4")],
            vec![
                trip("a", "4-CVX", "East", 0, &["1", "2"]),
                trip("b", "4-CVX", "Maple Bay", 0, &["1", "2", "3"]),
                trip("c", "4-CVX", "Duncan via Maple Bay", 1, &["3", "2", "1"]),
            ],
        );

        let output = generator.run(&feed).unwrap();
        let route = &output.routes[0];
        assert!(!route.split);
        assert_eq!(route.directions.len(), 2);
        assert_eq!(route.directions[0].tag, DirectionTag::new("0"));
        assert_eq!(route.directions[0].label, "Maple Bay");
        assert_eq!(route.directions[1].label, "Duncan");
        assert_eq!(route.trip_count(), 3);
    }

    #[test]
    fn unmapped_merge_aborts_the_run() {
        let registry = PatternRegistry::new();
        let generator = Generator::new("10", &registry, MergePolicy::new(), SplitConfig::default());
        let feed = feed(
            vec![feed_route("2-CVX", "10", "2")],
            vec![
                trip("a", "2-CVX", "Duncan", 0, &["1"]),
                trip("b", "2-CVX", "Crofton", 0, &["1"]),
            ],
        );

        let err = generator.run(&feed).unwrap_err();
        assert!(matches!(err, SplitError::UnmappedMerge { .. }));
    }

    #[test]
    fn unmapped_color_aborts_the_run() {
        let registry = PatternRegistry::new();
        let generator = Generator::new("10", &registry, MergePolicy::new(), SplitConfig::default());
        let feed = feed(
            vec![feed_route("42-CVX", "10", "42")],
            vec![trip("a", "42-CVX", "Duncan", 0, &["1"])],
        );

        let err = generator.run(&feed).unwrap_err();
        assert!(matches!(err, SplitError::UnmappedLookup { .. }));
    }

    #[test]
    fn runs_do_not_share_classifications() {
        let registry = registry();
        let generator = Generator::new("10", &registry, MergePolicy::new(), SplitConfig::default());
        let first = feed(
            vec![feed_route("8-CVX", "10", "8")],
            vec![trip("t1", "8-CVX", "Mill Bay", 0, &["104033", "108060"])],
        );
        let second = feed(
            vec![feed_route("8-CVX", "10", "8")],
            vec![trip("t1", "8-CVX", "Duncan", 1, &["108060", "104033"])],
        );

        let a = generator.run(&first).unwrap();
        let b = generator.run(&second).unwrap();
        assert_eq!(a.routes[0].directions[1].trips.len(), 1);
        assert_eq!(b.routes[0].directions[0].trips.len(), 1);
    }

    #[test]
    fn built_in_tables_load() {
        let generator = Generator::cowichan_valley(SplitConfig::default()).unwrap();
        assert_eq!(generator.agency_id, "10");
        assert_eq!(generator.registry.len(), 8);
    }
}
