//! GTFS feed loading.
//!
//! Reads the files the generator needs (routes.txt, trips.txt, stop_times.txt
//! and stops.txt) from an unpacked GTFS directory. Calendar handling is left
//! to the caller, which may pass the set of service ids to keep.

mod error;
mod routes;
mod stop_times;
mod stops;
mod trips;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::{ObservedTrip, StopId};

pub use error::FeedError;
pub use routes::FeedRoute;

/// The parts of a GTFS feed used for direction splitting.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    /// Routes keyed by GTFS route_id
    pub routes: BTreeMap<String, FeedRoute>,
    /// Trips keyed by GTFS route_id, in trips.txt order
    pub trips: BTreeMap<String, Vec<ObservedTrip>>,
    /// Raw stop names from stops.txt
    pub stops: BTreeMap<StopId, String>,
}

impl Feed {
    /// Load every trip in the directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, FeedError> {
        Self::load(dir, None)
    }

    /// Load only trips running one of the given services.
    pub fn load_from_dir_for_services(
        dir: &Path,
        services: &BTreeSet<String>,
    ) -> Result<Self, FeedError> {
        Self::load(dir, Some(services))
    }

    fn load(dir: &Path, services: Option<&BTreeSet<String>>) -> Result<Self, FeedError> {
        let routes = routes::load(open(dir, "routes.txt")?)?;
        let loaded = trips::load(open(dir, "trips.txt")?, &routes, services)?;
        let mut stop_times = stop_times::load(open(dir, "stop_times.txt")?, &loaded.skipped)?;
        let stops = stops::load(open(dir, "stops.txt")?)?;

        let mut trips: BTreeMap<String, Vec<ObservedTrip>> = BTreeMap::new();
        for mut trip in loaded.kept {
            trip.stop_times = match stop_times.remove(&trip.id) {
                Some(list) => list,
                None => return Err(FeedError::NoStopTimes(trip.id)),
            };
            trips
                .entry(trip.route_id.as_str().to_string())
                .or_default()
                .push(trip);
        }

        if let Some(unknown) = stop_times.into_keys().next() {
            return Err(FeedError::UnknownTrip(unknown));
        }

        debug!(skipped = loaded.skipped.len(), "Filtered trips by service");
        let feed = Feed {
            routes,
            trips,
            stops,
        };
        info!(
            routes = feed.routes.len(),
            trips = feed.trip_count(),
            stops = feed.stops.len(),
            dir = %dir.display(),
            "Loaded feed"
        );
        Ok(feed)
    }

    /// Trips of one route, by GTFS route_id.
    pub fn trips_for(&self, gtfs_route_id: &str) -> &[ObservedTrip] {
        self.trips
            .get(gtfs_route_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn trip_count(&self) -> usize {
        self.trips.values().map(Vec::len).sum()
    }
}

fn open(dir: &Path, name: &str) -> Result<File, FeedError> {
    let path = dir.join(name);
    File::open(&path).map_err(|source| FeedError::Io { path, source })
}
