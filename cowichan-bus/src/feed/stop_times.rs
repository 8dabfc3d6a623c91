use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::domain::{FeedTime, StopId, StopTime, TripId};

use super::FeedError;

/// Load stop times grouped by trip, each list sorted by `stop_sequence`.
///
/// Rows for trips in `skipped` are dropped.
pub fn load<R: std::io::Read>(
    reader: R,
    skipped: &BTreeSet<TripId>,
) -> Result<BTreeMap<TripId, Vec<StopTime>>, FeedError> {
    let mut results: BTreeMap<TripId, Vec<StopTime>> = BTreeMap::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec.map_err(|source| FeedError::Csv {
            file: "stop_times.txt",
            source,
        })?;
        let trip = TripId::new(rec.trip_id);
        if skipped.contains(&trip) {
            continue;
        }

        let stop_id = StopId::parse(&rec.stop_id).map_err(|source| FeedError::StopId {
            trip: trip.clone(),
            source,
        })?;
        let arrival = match rec.arrival_time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => {
                Some(FeedTime::parse_hms(t).map_err(|source| FeedError::Time {
                    trip: trip.clone(),
                    source,
                })?)
            }
            _ => None,
        };

        results.entry(trip).or_default().push(StopTime {
            stop_id,
            stop_sequence: rec.stop_sequence,
            arrival,
        });
    }

    for list in results.values_mut() {
        list.sort_by_key(|st| st.stop_sequence);
    }
    Ok(results)
}

#[derive(Deserialize)]
struct Record {
    trip_id: String,
    #[serde(default)]
    arrival_time: Option<String>,
    stop_id: String,
    stop_sequence: u32,
}
