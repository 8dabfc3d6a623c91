//! Canonical patterns and two-way route specifications.

use crate::domain::{DirectionTag, RouteId, StopId};
use crate::split::SplitError;

use super::PatternElement;

/// A hand-curated stop order for one direction of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPattern {
    tag: DirectionTag,
    label: String,
    elements: Vec<PatternElement>,
}

impl CanonicalPattern {
    pub fn new(tag: DirectionTag, label: impl Into<String>, elements: Vec<PatternElement>) -> Self {
        Self {
            tag,
            label: label.into(),
            elements,
        }
    }

    pub fn tag(&self) -> DirectionTag {
        self.tag
    }

    /// Destination text shown to riders, before normalization.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elements(&self) -> &[PatternElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Both canonical patterns of a two-way route.
///
/// Guaranteed by construction: exactly two patterns, both non-empty, every
/// `Alternate` has at least one stop, and the two tags differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    route_id: RouteId,
    patterns: [CanonicalPattern; 2],
}

impl RouteSpec {
    /// Validate and assemble a route spec.
    pub fn new(
        route_id: RouteId,
        first: CanonicalPattern,
        second: CanonicalPattern,
    ) -> Result<Self, SplitError> {
        let gap = |reason: String| SplitError::ConfigurationGap {
            route: route_id.clone(),
            reason,
        };

        if first.tag == second.tag {
            return Err(gap(format!("duplicate direction tag {}", first.tag)));
        }
        for pattern in [&first, &second] {
            if pattern.is_empty() {
                return Err(gap(format!("empty pattern for direction {}", pattern.tag)));
            }
            if pattern
                .elements
                .iter()
                .any(|el| matches!(el, PatternElement::Alternate(set) if set.is_empty()))
            {
                return Err(gap(format!(
                    "empty alternate set in direction {}",
                    pattern.tag
                )));
            }
        }

        Ok(Self {
            route_id,
            patterns: [first, second],
        })
    }

    /// Start building a spec for the given route.
    pub fn builder(route_id: &str) -> RouteSpecBuilder {
        RouteSpecBuilder::new(RouteId::new(route_id))
    }

    pub fn route_id(&self) -> &RouteId {
        &self.route_id
    }

    pub fn patterns(&self) -> &[CanonicalPattern; 2] {
        &self.patterns
    }

    /// Get the pattern with the given tag.
    pub fn pattern(&self, tag: DirectionTag) -> Option<&CanonicalPattern> {
        self.patterns.iter().find(|p| p.tag == tag)
    }
}

/// Fluent builder for one direction's element list.
///
/// Invalid stop ids are remembered and reported when the owning
/// [`RouteSpecBuilder`] is built.
#[derive(Debug, Default)]
pub struct PatternBuilder {
    elements: Vec<PatternElement>,
    invalid: Option<String>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, stop: &str) -> Self {
        self.push(stop, PatternElement::Required)
    }

    pub fn optional(self, stop: &str) -> Self {
        self.push(stop, PatternElement::Optional)
    }

    pub fn looping(self, stop: &str) -> Self {
        self.push(stop, PatternElement::Loop)
    }

    pub fn shared(self, stop: &str) -> Self {
        self.push(stop, PatternElement::Shared)
    }

    pub fn alternate(mut self, stops: &[&str]) -> Self {
        let mut set = Vec::with_capacity(stops.len());
        for s in stops {
            match StopId::parse(s) {
                Ok(id) => set.push(id),
                Err(e) => {
                    self.invalid.get_or_insert_with(|| format!("{s:?}: {e}"));
                }
            }
        }
        self.elements.push(PatternElement::Alternate(set));
        self
    }

    fn push(mut self, stop: &str, make: fn(StopId) -> PatternElement) -> Self {
        match StopId::parse(stop) {
            Ok(id) => self.elements.push(make(id)),
            Err(e) => {
                self.invalid.get_or_insert_with(|| format!("{stop:?}: {e}"));
            }
        }
        self
    }
}

/// Builder for [`RouteSpec`], mirroring how the pattern tables are written.
#[derive(Debug)]
pub struct RouteSpecBuilder {
    route_id: RouteId,
    directions: Vec<(DirectionTag, String, PatternBuilder)>,
}

impl RouteSpecBuilder {
    pub fn new(route_id: RouteId) -> Self {
        Self {
            route_id,
            directions: Vec::new(),
        }
    }

    /// Add one direction with its destination label and stop pattern.
    pub fn direction(mut self, tag: DirectionTag, label: &str, pattern: PatternBuilder) -> Self {
        self.directions.push((tag, label.to_string(), pattern));
        self
    }

    /// Validate and build the spec.
    pub fn build(self) -> Result<RouteSpec, SplitError> {
        let route_id = self.route_id;
        let count = self.directions.len();
        if count != 2 {
            return Err(SplitError::ConfigurationGap {
                route: route_id,
                reason: format!("expected 2 directions, found {count}"),
            });
        }

        let mut patterns = Vec::with_capacity(2);
        for (tag, label, builder) in self.directions {
            if let Some(invalid) = builder.invalid {
                return Err(SplitError::ConfigurationGap {
                    route: route_id,
                    reason: format!("direction {tag}: {invalid}"),
                });
            }
            patterns.push(CanonicalPattern::new(tag, label, builder.elements));
        }

        let second = patterns.pop();
        let first = patterns.pop();
        match (first, second) {
            (Some(first), Some(second)) => RouteSpec::new(route_id, first, second),
            _ => Err(SplitError::ConfigurationGap {
                route: route_id,
                reason: "missing direction".to_string(),
            }),
        }
    }
}
