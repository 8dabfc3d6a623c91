//! Serializable output of a generation run.

use serde::Serialize;

use crate::domain::{DirectionTag, RouteId, StopId, TripId};

/// Everything produced for one agency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyOutput {
    pub agency_id: String,

    /// Agency color (hex, no '#')
    pub color: String,

    pub routes: Vec<RouteOutput>,
}

/// One rider-facing route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOutput {
    /// Route short name
    pub id: RouteId,

    pub long_name: Option<String>,

    pub color: String,

    /// Whether the directions came from canonical patterns rather than the
    /// feed's direction ids
    pub split: bool,

    pub directions: Vec<DirectionOutput>,
}

/// One direction of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionOutput {
    pub tag: DirectionTag,

    /// Destination label
    pub label: String,

    pub trips: Vec<TripOutput>,
}

/// A trip with its stops in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripOutput {
    pub id: TripId,

    /// Raw feed headsign
    pub headsign: Option<String>,

    pub stops: Vec<StopOutput>,
}

/// One visit in output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopOutput {
    pub stop_id: StopId,

    /// Cleaned stop name, absent when the feed has none
    pub name: Option<String>,

    /// Feed stop sequence
    pub sequence: u32,

    /// Scheduled arrival (HH:MM:SS)
    pub arrival: Option<String>,

    /// Canonical rank, absent for unranked visits
    pub rank: Option<u32>,
}

impl RouteOutput {
    pub fn trip_count(&self) -> usize {
        self.directions.iter().map(|d| d.trips.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_plain_ids() {
        let route = RouteOutput {
            id: RouteId::new("8"),
            long_name: None,
            color: "49176D".into(),
            split: true,
            directions: vec![DirectionOutput {
                tag: DirectionTag::SOUTH,
                label: "Mill Bay".into(),
                trips: vec![TripOutput {
                    id: TripId::new("t1"),
                    headsign: Some("Mill Bay".into()),
                    stops: vec![StopOutput {
                        stop_id: StopId::parse("104033").unwrap(),
                        name: Some("Duncan Exch Bay 1".into()),
                        sequence: 1,
                        arrival: Some("08:00:00".into()),
                        rank: Some(1),
                    }],
                }],
            }],
        };

        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["id"], "8");
        assert_eq!(json["directions"][0]["tag"], "south");
        assert_eq!(json["directions"][0]["trips"][0]["id"], "t1");
        let stop = &json["directions"][0]["trips"][0]["stops"][0];
        assert_eq!(stop["stop_id"], "104033");
        assert_eq!(stop["name"], "Duncan Exch Bay 1");
        assert_eq!(route.trip_count(), 1);
    }
}
