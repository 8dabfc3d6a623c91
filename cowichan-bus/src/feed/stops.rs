use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::StopId;

use super::FeedError;

/// Load raw stop names keyed by stop id.
///
/// Stops without a name are left out.
pub fn load<R: std::io::Read>(reader: R) -> Result<BTreeMap<StopId, String>, FeedError> {
    let mut names = BTreeMap::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec.map_err(|source| FeedError::Csv {
            file: "stops.txt",
            source,
        })?;
        let stop_id = StopId::parse(&rec.stop_id).map_err(|source| FeedError::InvalidStop {
            value: rec.stop_id.clone(),
            source,
        })?;
        if names.contains_key(&stop_id) {
            return Err(FeedError::DuplicateStop(stop_id));
        }
        if let Some(name) = rec.stop_name.filter(|n| !n.trim().is_empty()) {
            names.insert(stop_id, name);
        }
    }
    Ok(names)
}

#[derive(Deserialize)]
struct Record {
    stop_id: String,
    #[serde(default)]
    stop_name: Option<String>,
}
