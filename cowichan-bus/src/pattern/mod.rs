//! Canonical stop patterns for two-way routes.
//!
//! Each split route declares two hand-authored stop orders, one per
//! direction. The pattern elements carry how strictly a stop must appear,
//! which the aligner in [`crate::split`] turns into scores and ranks.

mod element;
mod registry;
mod route_spec;

pub use element::PatternElement;
pub use registry::{PatternRegistry, cowichan_valley};
pub use route_spec::{CanonicalPattern, PatternBuilder, RouteSpec, RouteSpecBuilder};
