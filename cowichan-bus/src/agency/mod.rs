//! Cowichan Valley Regional Transit System rules.
//!
//! Everything specific to this agency lives here: which feed routes belong to
//! it, their colors, how labels are cleaned, and the generation run that ties
//! the feed to the pattern registry and merge table.

mod clean;
mod colors;
mod generator;

pub use clean::{clean_stop_name, clean_trip_headsign};
pub use colors::route_color;
pub use generator::Generator;

/// GTFS agency_id of the Cowichan Valley system within the BC Transit feed.
pub const AGENCY_ID: &str = "10";

/// Agency color from the corporate graphic standards.
pub const AGENCY_COLOR: &str = "34B233";
