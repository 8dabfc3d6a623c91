//! Rider-facing label cleanup for headsigns and stop names.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Words that stay upper case when an all-caps name is title-cased.
const KEEP_UPPER: &[&str] = &["BC", "NB", "SB", "EB", "WB"];

/// Long street types and their abbreviations.
const STREET_TYPES: &[(&str, &str)] = &[
    ("avenue", "Ave"),
    ("boulevard", "Blvd"),
    ("crescent", "Cres"),
    ("drive", "Dr"),
    ("highway", "Hwy"),
    ("place", "Pl"),
    ("road", "Rd"),
    ("street", "St"),
    ("trail", "Trl"),
];

static VIA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s?-?\s?\bvia .*$").unwrap());
static TO_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^.*\bto ").unwrap());
static EXPRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|\W)express(\W|$)").unwrap());
static AND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(^|\W)and(\W|$)").unwrap());
static AT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(^|\W)at(\W|$)").unwrap());
static EXCHANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|\W)exchange(\W|$)").unwrap());
static TRL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(^|\W)trl(\W|$)").unwrap());
static STREET_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(avenue|boulevard|crescent|drive|highway|place|road|street|trail)\b")
        .unwrap()
});
static BOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(north|south|east|west)bound\b").unwrap());
static STATUS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\(-(dcom|impl)-\)").unwrap());
static SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*/\s*").unwrap());
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]+").unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Clean a trip headsign into a destination label.
///
/// # Examples
///
/// ```
/// use cowichan_bus::agency::clean_trip_headsign;
///
/// assert_eq!(clean_trip_headsign("Duncan via Cowichan Bay"), "Duncan");
/// assert_eq!(clean_trip_headsign("Route 8 to Mill Bay"), "Mill Bay");
/// ```
pub fn clean_trip_headsign(headsign: &str) -> String {
    let s = VIA.replace_all(headsign, "");
    let s = TO_PREFIX.replace_all(&s, "");
    let s = EXPRESS.replace_all(&s, "${1}${2}");
    let s = AND.replace_all(&s, "${1}&${2}");
    let s = abbreviate_street_types(&s);
    let s = TRL.replace_all(&s, "${1}Trail${2}");
    let s = SLASH.replace_all(&s, " / ");
    clean_label(&s)
}

/// Clean a feed stop name.
pub fn clean_stop_name(name: &str) -> String {
    let s = title_case_if_shouting(name);
    let s = STATUS_PREFIX.replace_all(&s, "");
    let s = BOUND.replace_all(&s, |caps: &Captures| {
        let first = caps[1].chars().next().unwrap_or('N').to_ascii_uppercase();
        format!("{first}B")
    });
    let s = AT.replace_all(&s, "${1}/${2}");
    let s = EXCHANGE.replace_all(&s, "${1}Exch${2}");
    let s = abbreviate_street_types(&s);
    let s = TRL.replace_all(&s, "${1}Trail${2}");
    clean_label(&s)
}

fn abbreviate_street_types(s: &str) -> String {
    STREET_TYPE
        .replace_all(s, |caps: &Captures| {
            let word = caps[1].to_ascii_lowercase();
            STREET_TYPES
                .iter()
                .find(|(long, _)| *long == word)
                .map(|(_, short)| short.to_string())
                .unwrap_or_else(|| caps[1].to_string())
        })
        .into_owned()
}

/// Title-case a name written entirely in capitals.
fn title_case_if_shouting(name: &str) -> String {
    if name.chars().any(|c| c.is_ascii_lowercase()) {
        return name.to_string();
    }
    WORD.replace_all(name, |caps: &Captures| {
        let word = &caps[0];
        if KEEP_UPPER.contains(&word) {
            return word.to_string();
        }
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_string() + &chars.as_str().to_ascii_lowercase(),
            None => String::new(),
        }
    })
    .into_owned()
}

fn clean_label(s: &str) -> String {
    let squeezed = SPACES.replace_all(s.trim(), " ");
    let mut chars = squeezed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Cleaning never leaves doubled or surrounding whitespace
        #[test]
        fn labels_are_squeezed(s in "[A-Za-z /-]{0,40}") {
            for cleaned in [clean_trip_headsign(&s), clean_stop_name(&s)] {
                prop_assert!(!cleaned.contains("  "));
                prop_assert_eq!(cleaned.trim(), cleaned.as_str());
            }
        }
    }
}
