use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::domain::{ObservedTrip, RouteId, TripId};

use super::{FeedError, FeedRoute};

/// Trips in file order, without stop times yet.
#[derive(Debug, Default)]
pub struct LoadedTrips {
    pub kept: Vec<ObservedTrip>,
    /// Trips dropped by the service filter; their stop times are ignored
    pub skipped: BTreeSet<TripId>,
}

pub fn load<R: std::io::Read>(
    reader: R,
    routes: &BTreeMap<String, FeedRoute>,
    services: Option<&BTreeSet<String>>,
) -> Result<LoadedTrips, FeedError> {
    let mut loaded = LoadedTrips::default();
    let mut seen = BTreeSet::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec.map_err(|source| FeedError::Csv {
            file: "trips.txt",
            source,
        })?;
        let id = TripId::new(rec.trip_id);
        if !seen.insert(id.clone()) {
            return Err(FeedError::DuplicateTrip(id));
        }
        if !routes.contains_key(&rec.route_id) {
            return Err(FeedError::UnknownRoute {
                trip: id,
                route: rec.route_id,
            });
        }
        if let Some(value) = rec.direction_id.filter(|d| *d > 1) {
            return Err(FeedError::Direction { trip: id, value });
        }
        if services.is_some_and(|keep| !keep.contains(&rec.service_id)) {
            loaded.skipped.insert(id);
            continue;
        }

        let mut trip = ObservedTrip::new(id, RouteId::new(rec.route_id), Vec::new());
        trip.headsign = rec.trip_headsign.filter(|h| !h.trim().is_empty());
        trip.direction_id = rec.direction_id;
        loaded.kept.push(trip);
    }
    Ok(loaded)
}

#[derive(Deserialize)]
struct Record {
    trip_id: String,
    route_id: String,
    service_id: String,
    #[serde(default)]
    trip_headsign: Option<String>,
    #[serde(default)]
    direction_id: Option<u8>,
}
