//! Route colors.

use crate::feed::FeedRoute;
use crate::split::SplitError;

/// Colors for routes whose feed entry has none, by short name.
const ROUTE_COLORS: &[(&str, &str)] = &[
    ("2", "17468B"),
    ("3", "80CC28"),
    ("4", "F68712"),
    ("5", "C06EBE"),
    ("6", "ED0790"),
    ("7", "49690F"),
    ("8", "49176D"),
    ("9", "B2BB1E"),
    ("20", "0073AD"),
    ("21", "A54499"),
    ("31", "FBBD09"),
    ("34", "0B6FAE"),
    ("36", "8A0C34"),
    ("44", "00AA4F"),
    ("66", "8CC63F"),
    ("99", "114D8A"),
    ("7x", "ACA86E"),
];

/// Resolve a route's display color.
///
/// The feed's own color wins. Otherwise the short name must be in the agency
/// table; a route in neither is a gap in the table.
pub fn route_color(route: &FeedRoute) -> Result<String, SplitError> {
    if let Some(color) = &route.color {
        return Ok(color.trim().to_ascii_uppercase());
    }
    let short_name = route.route_id();
    ROUTE_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(short_name.as_str()))
        .map(|(_, color)| color.to_string())
        .ok_or_else(|| SplitError::UnmappedLookup {
            table: "route color",
            key: short_name.to_string(),
        })
}
