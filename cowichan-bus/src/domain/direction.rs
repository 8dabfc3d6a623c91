//! Direction keys for two-way routes.

use std::fmt;

use serde::Serialize;

/// Opaque key distinguishing the two canonical patterns of a route.
///
/// Tags carry no geographic meaning. The names are whatever the pattern
/// table chose ("north", "east", ...); the only thing that matters is that a
/// route's two tags differ.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DirectionTag(&'static str);

impl DirectionTag {
    pub const NORTH: DirectionTag = DirectionTag("north");
    pub const SOUTH: DirectionTag = DirectionTag("south");
    pub const EAST: DirectionTag = DirectionTag("east");
    pub const WEST: DirectionTag = DirectionTag("west");

    /// Creates a tag with the given name.
    pub const fn new(name: &'static str) -> Self {
        DirectionTag(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for DirectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirectionTag({})", self.0)
    }
}

impl fmt::Display for DirectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
