//! Stop visit types for observed trips.
//!
//! A `StopTime` is one visit of a trip to a stop, as published by the feed.
//! A `StopIndex` identifies that visit by position within its trip.

use super::{FeedTime, StopId};

/// Index of a visit within a trip's stop sequence.
///
/// Used instead of `StopId` to disambiguate trips that visit the same stop
/// more than once (loops around a terminus, out-and-back segments).
///
/// # Examples
///
/// ```
/// use cowichan_bus::domain::StopIndex;
///
/// // Visits order by position, not by stop
/// assert!(StopIndex(0) < StopIndex(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

/// A scheduled visit to a stop.
///
/// `stop_sequence` is the feed's own ordering key. It only has to increase
/// along the trip; gaps are common.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    /// Stop visited
    pub stop_id: StopId,
    /// Feed-provided sequence number
    pub stop_sequence: u32,
    /// Scheduled arrival, absent for untimed stops
    pub arrival: Option<FeedTime>,
}

impl StopTime {
    /// Creates an untimed visit.
    pub fn new(stop_id: StopId, stop_sequence: u32) -> Self {
        Self {
            stop_id,
            stop_sequence,
            arrival: None,
        }
    }

    /// Creates a timed visit.
    pub fn timed(stop_id: StopId, stop_sequence: u32, arrival: FeedTime) -> Self {
        Self {
            stop_id,
            stop_sequence,
            arrival: Some(arrival),
        }
    }
}
