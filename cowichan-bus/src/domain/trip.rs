//! Observed trip type.
//!
//! An `ObservedTrip` is one realized vehicle run as published by the feed,
//! already filtered down to services the pipeline cares about. It is read
//! once, classified, and handed to the output stage unchanged.

use super::{RouteId, StopId, StopIndex, StopTime, TripId};

/// A scheduled trip with its ordered stop visits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedTrip {
    /// Feed trip id, used as the trip's identity
    pub id: TripId,
    /// Route this trip runs on
    pub route_id: RouteId,
    /// Raw destination text from the feed
    pub headsign: Option<String>,
    /// Feed direction id (0 or 1), if published
    pub direction_id: Option<u8>,
    /// Stop visits ordered by `stop_sequence`
    pub stop_times: Vec<StopTime>,
}

impl ObservedTrip {
    /// Creates a trip without headsign or direction.
    pub fn new(id: TripId, route_id: RouteId, stop_times: Vec<StopTime>) -> Self {
        Self {
            id,
            route_id,
            headsign: None,
            direction_id: None,
            stop_times,
        }
    }

    /// Returns the visited stop ids in order.
    pub fn stop_ids(&self) -> Vec<StopId> {
        self.stop_times.iter().map(|st| st.stop_id.clone()).collect()
    }

    /// Returns the visit at the given index, if any.
    pub fn get(&self, idx: StopIndex) -> Option<&StopTime> {
        self.stop_times.get(idx.0)
    }

    pub fn len(&self) -> usize {
        self.stop_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_times.is_empty()
    }
}
