//! Feed loading error types.

use std::path::PathBuf;

use crate::domain::{InvalidStopId, RouteId, StopId, TimeError, TripId};

/// Errors that can occur while reading a GTFS directory.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A feed file could not be opened
    #[error("cannot read {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A feed file is not valid CSV for its schema
    #[error("{file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A stop time has a malformed arrival
    #[error("trip {trip}: {source}")]
    Time {
        trip: TripId,
        #[source]
        source: TimeError,
    },

    /// A stop time has a malformed stop id
    #[error("trip {trip}: {source}")]
    StopId {
        trip: TripId,
        #[source]
        source: InvalidStopId,
    },

    /// A trip has a direction id other than 0 or 1
    #[error("trip {trip}: unknown direction_id {value}")]
    Direction { trip: TripId, value: u8 },

    /// Stop times reference a trip missing from trips.txt
    #[error("stop times defined for unknown trip {0}")]
    UnknownTrip(TripId),

    /// A trip references a route missing from routes.txt
    #[error("trip {trip}: unknown route {route}")]
    UnknownRoute { trip: TripId, route: String },

    /// A kept trip has no stop times
    #[error("trip {0} has no stop times")]
    NoStopTimes(TripId),

    /// routes.txt lists a route id twice
    #[error("duplicate route {0}")]
    DuplicateRoute(RouteId),

    /// trips.txt lists a trip id twice
    #[error("duplicate trip {0}")]
    DuplicateTrip(TripId),

    /// stops.txt has a malformed stop id
    #[error("stops.txt: stop {value:?}: {source}")]
    InvalidStop {
        value: String,
        #[source]
        source: InvalidStopId,
    },

    /// stops.txt lists a stop id twice
    #[error("duplicate stop {0}")]
    DuplicateStop(StopId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::NoStopTimes(TripId::new("t9"));
        assert_eq!(err.to_string(), "trip t9 has no stop times");

        let err = FeedError::Direction {
            trip: TripId::new("t1"),
            value: 7,
        };
        assert_eq!(err.to_string(), "trip t1: unknown direction_id 7");

        let err = FeedError::Io {
            path: PathBuf::from("/feed/routes.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "cannot read /feed/routes.txt: missing");
    }
}
