//! Domain types for the direction splitter.
//!
//! This module contains the feed-level types the splitter works on. Types
//! that wrap external identifiers validate them at construction time, so
//! code that receives them can trust their shape.

mod direction;
mod route;
mod stop;
mod stop_time;
mod time;
mod trip;

pub use direction::DirectionTag;
pub use route::{RouteId, TripId};
pub use stop::{InvalidStopId, StopId};
pub use stop_time::{StopIndex, StopTime};
pub use time::{FeedTime, TimeError};
pub use trip::ObservedTrip;
