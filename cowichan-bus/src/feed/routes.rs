use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::RouteId;

use super::FeedError;

/// One row of routes.txt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRoute {
    pub gtfs_id: String,
    pub agency_id: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    /// Hex color without '#', if the feed publishes one
    pub color: Option<String>,
}

impl FeedRoute {
    /// The rider-facing route id: the short name, or the GTFS id without one.
    pub fn route_id(&self) -> RouteId {
        RouteId::new(self.short_name.as_deref().unwrap_or(&self.gtfs_id))
    }
}

pub fn load<R: std::io::Read>(reader: R) -> Result<BTreeMap<String, FeedRoute>, FeedError> {
    let mut routes = BTreeMap::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec.map_err(|source| FeedError::Csv {
            file: "routes.txt",
            source,
        })?;
        if routes.contains_key(&rec.route_id) {
            return Err(FeedError::DuplicateRoute(RouteId::new(rec.route_id)));
        }
        routes.insert(
            rec.route_id.clone(),
            FeedRoute {
                gtfs_id: rec.route_id,
                agency_id: rec.agency_id,
                short_name: rec.route_short_name,
                long_name: rec.route_long_name,
                color: rec.route_color.filter(|c| !c.trim().is_empty()),
            },
        );
    }
    Ok(routes)
}

#[derive(Deserialize)]
struct Record {
    route_id: String,
    #[serde(default)]
    agency_id: Option<String>,
    #[serde(default)]
    route_short_name: Option<String>,
    #[serde(default)]
    route_long_name: Option<String>,
    #[serde(default)]
    route_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_optional_columns() {
        let data = "\
route_id,agency_id,route_short_name,route_long_name,route_type,route_color
8-CVX,10,8,Mill Bay,3,
7x-CVX,10,7x,Express,3,ACA86E
";
        let routes = load(data.as_bytes()).unwrap();

        assert_eq!(routes.len(), 2);
        let r8 = &routes["8-CVX"];
        assert_eq!(r8.agency_id.as_deref(), Some("10"));
        assert_eq!(r8.color, None);
        assert_eq!(r8.route_id(), RouteId::new("8"));
        assert_eq!(routes["7x-CVX"].color.as_deref(), Some("ACA86E"));
    }

    #[test]
    fn missing_short_name_falls_back_to_gtfs_id() {
        let data = "route_id,route_long_name\nR1,Somewhere\n";
        let routes = load(data.as_bytes()).unwrap();
        assert_eq!(routes["R1"].route_id(), RouteId::new("R1"));
    }

    #[test]
    fn duplicate_route_rejected() {
        let data = "route_id,route_short_name\nR1,1\nR1,2\n";
        let err = load(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FeedError::DuplicateRoute(id) if id == RouteId::new("R1")));
    }
}
