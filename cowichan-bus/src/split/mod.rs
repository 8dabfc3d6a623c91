//! Direction splitting for two-way routes.
//!
//! This module answers, for every trip of a route with canonical patterns:
//! "which direction does this trip run, and in what order are its stops?"
//!
//! Each trip is aligned against both of the route's patterns. The better
//! alignment decides the direction and provides a rank for every stop it
//! recognised, which then drives stop ordering.

mod align;
mod cache;
mod classify;
mod config;
mod error;
mod merge;
mod order;
mod splitter;


pub use align::{Alignment, Rank, RankMap, Score, align};
pub use cache::RankCache;
pub use classify::{Classification, classify};
pub use config::{ConfigError, SplitConfig};
pub use error::SplitError;
pub use merge::{MergePolicy, cowichan_valley_merges};
pub use order::{TripContext, compare_early, ordered_stops};
pub use splitter::{RouteSplit, SplitStats, SyntheticTrip, TripSplitter};
