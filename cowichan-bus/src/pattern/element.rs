//! Elements of a canonical stop pattern.

use crate::domain::StopId;

/// One position in a canonical pattern.
///
/// The variant decides how the aligner treats the position:
///
/// | Variant     | Matches                 | Score when matched | Penalty when skipped |
/// |-------------|-------------------------|--------------------|----------------------|
/// | `Required`  | the stop                | +1                 | 1                    |
/// | `Alternate` | any stop of the set     | +1                 | 1                    |
/// | `Optional`  | the stop                | 0                  | 0                    |
/// | `Loop`      | the stop, up to twice   | +1 per pass        | 0                    |
/// | `Shared`    | the stop, cursor stays  | 0                  | 0                    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    /// Must appear; consumes one rank slot.
    Required(StopId),
    /// Any one of several equivalent stops (renamed or rerouted stop).
    Alternate(Vec<StopId>),
    /// May be present or absent.
    Optional(StopId),
    /// Visited on the way out and again on the way back.
    Loop(StopId),
    /// Served by both directions. A weak anchor that never moves the cursor.
    Shared(StopId),
}

impl PatternElement {
    /// Returns true if the given stop may occupy this position.
    pub fn matches(&self, stop: &StopId) -> bool {
        match self {
            PatternElement::Required(s)
            | PatternElement::Optional(s)
            | PatternElement::Loop(s)
            | PatternElement::Shared(s) => s == stop,
            PatternElement::Alternate(set) => set.contains(stop),
        }
    }

    /// Returns true if a match counts toward the alignment score.
    pub fn is_anchor(&self) -> bool {
        matches!(
            self,
            PatternElement::Required(_) | PatternElement::Alternate(_) | PatternElement::Loop(_)
        )
    }

    /// Returns true if passing over this element without a match costs score.
    pub fn is_penalized(&self) -> bool {
        matches!(
            self,
            PatternElement::Required(_) | PatternElement::Alternate(_)
        )
    }

    /// Returns true if matching leaves the pattern cursor in place.
    pub fn is_shared(&self) -> bool {
        matches!(self, PatternElement::Shared(_))
    }

    /// Returns true if the element expects a second pass.
    pub fn is_loop(&self) -> bool {
        matches!(self, PatternElement::Loop(_))
    }

    /// All stops that can occupy this position.
    pub fn stops(&self) -> &[StopId] {
        match self {
            PatternElement::Required(s)
            | PatternElement::Optional(s)
            | PatternElement::Loop(s)
            | PatternElement::Shared(s) => std::slice::from_ref(s),
            PatternElement::Alternate(set) => set,
        }
    }
}
