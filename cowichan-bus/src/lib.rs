//! Direction splitting for Cowichan Valley transit routes.
//!
//! A feed-processing library that answers: "which way is this trip
//! going, and in what order does it visit its stops?"

pub mod agency;
pub mod domain;
pub mod feed;
pub mod pattern;
pub mod report;
pub mod split;
