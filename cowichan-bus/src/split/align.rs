//! Alignment of an observed stop sequence against one canonical pattern.
//!
//! The aligner walks two cursors: one over the observed stops, one over the
//! pattern. A stop that matches at the pattern cursor is ranked and both
//! cursors advance. A stop that does not match is looked up in a bounded
//! window further down the pattern; a hit moves the pattern cursor past it
//! and charges one point for every scoring element jumped over. A miss leaves
//! the stop unranked and the pattern cursor where it was.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{StopId, StopIndex};
use crate::pattern::{CanonicalPattern, PatternElement};

use super::SplitConfig;

/// Position of a stop within a canonical pattern, starting at 1.
///
/// The return pass of a loop is ranked after every first-pass position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(pub u32);

impl Rank {
    fn at(position: usize) -> Self {
        Rank(u32::try_from(position + 1).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ranks assigned to the visits of one trip. Unranked visits are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankMap {
    ranks: BTreeMap<StopIndex, Rank>,
}

impl RankMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, idx: StopIndex) -> Option<Rank> {
        self.ranks.get(&idx).copied()
    }

    pub fn is_ranked(&self, idx: StopIndex) -> bool {
        self.ranks.contains_key(&idx)
    }

    /// Iterates over ranked visits in visit order.
    pub fn iter(&self) -> impl Iterator<Item = (StopIndex, Rank)> + '_ {
        self.ranks.iter().map(|(idx, rank)| (*idx, *rank))
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    fn insert(&mut self, idx: StopIndex, rank: Rank) {
        self.ranks.insert(idx, rank);
    }
}

/// Alignment quality: matched anchors minus skipped elements, with
/// unranked stops as a tie-breaker.
///
/// Scores compare by `net()` first, then by fewer unranked stops. The empty
/// score (no observed stops at all) is below every other score.
#[derive(Debug, Clone, Copy, Default)]
pub struct Score {
    matched: u32,
    skipped: u32,
    unranked: u32,
    empty: bool,
}

impl Score {
    /// Score of an empty observed sequence.
    pub const EMPTY: Score = Score {
        matched: 0,
        skipped: 0,
        unranked: 0,
        empty: true,
    };

    pub fn matched(&self) -> u32 {
        self.matched
    }

    pub fn skipped(&self) -> u32 {
        self.skipped
    }

    pub fn unranked(&self) -> u32 {
        self.unranked
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Matched anchors minus skipped elements.
    pub fn net(&self) -> i64 {
        i64::from(self.matched) - i64::from(self.skipped)
    }

}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.empty, other.empty) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .net()
                .cmp(&other.net())
                .then_with(|| other.unranked.cmp(&self.unranked)),
        }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty {
            return f.write_str("empty");
        }
        write!(f, "{}", self.net())?;
        if self.unranked > 0 {
            write!(f, " ({} unranked)", self.unranked)?;
        }
        Ok(())
    }
}

/// Result of aligning one observed sequence against one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub score: Score,
    pub ranks: RankMap,
}

/// Align an observed stop sequence against a canonical pattern.
///
/// Always succeeds. An empty sequence yields [`Score::EMPTY`].
///
/// # Examples
///
/// ```
/// use cowichan_bus::domain::{DirectionTag, StopId, StopIndex};
/// use cowichan_bus::pattern::{CanonicalPattern, PatternElement};
/// use cowichan_bus::split::{Rank, SplitConfig, align};
///
/// let stop = |s: &str| StopId::parse(s).unwrap();
/// let south = CanonicalPattern::new(
///     DirectionTag::SOUTH,
///     "Mill Bay",
///     vec![
///         PatternElement::Required(stop("104033")),
///         PatternElement::Required(stop("108060")),
///     ],
/// );
///
/// let observed = [stop("104033"), stop("136373"), stop("108060")];
/// let alignment = align(&observed, &south, &SplitConfig::default());
///
/// assert_eq!(alignment.ranks.get(StopIndex(0)), Some(Rank(1)));
/// assert_eq!(alignment.ranks.get(StopIndex(1)), None);
/// assert_eq!(alignment.ranks.get(StopIndex(2)), Some(Rank(2)));
/// assert_eq!(alignment.score.net(), 2);
/// ```
pub fn align(observed: &[StopId], pattern: &CanonicalPattern, config: &SplitConfig) -> Alignment {
    if observed.is_empty() {
        return Alignment {
            score: Score::EMPTY,
            ranks: RankMap::new(),
        };
    }

    let elements = pattern.elements();
    let mut score = Score::default();
    let mut ranks = RankMap::new();
    let mut cursor = 0;
    // Loop positions passed once and still waiting for their return pass
    let mut open_loops: Vec<usize> = Vec::new();

    for (o, stop) in observed.iter().enumerate() {
        let idx = StopIndex(o);

        if let Some(hit) = find_in_window(elements, cursor, stop, config.lookahead) {
            let element = &elements[hit.position];
            ranks.insert(idx, Rank::at(hit.position));
            if element.is_shared() {
                continue;
            }
            score.skipped += hit.skipped;
            if element.is_anchor() {
                score.matched += 1;
            }
            if element.is_loop() {
                open_loops.push(hit.position);
            }
            cursor = hit.position + 1;
            continue;
        }

        match open_loops
            .iter()
            .position(|&position| elements[position].matches(stop))
        {
            Some(slot) => {
                let position = open_loops.remove(slot);
                ranks.insert(idx, Rank::at(position + elements.len()));
                score.matched += 1;
            }
            None => score.unranked += 1,
        }
    }

    Alignment { score, ranks }
}

struct WindowHit {
    position: usize,
    skipped: u32,
}

/// Find the first element at or after `cursor` matching `stop`, passing over
/// at most `lookahead` penalized elements.
fn find_in_window(
    elements: &[PatternElement],
    cursor: usize,
    stop: &StopId,
    lookahead: usize,
) -> Option<WindowHit> {
    let mut skipped = 0u32;
    for (position, element) in elements.iter().enumerate().skip(cursor) {
        if element.matches(stop) {
            return Some(WindowHit { position, skipped });
        }
        if element.is_penalized() {
            skipped += 1;
            if skipped as usize > lookahead {
                return None;
            }
        }
    }
    None
}
