//! Per-line keep/drop decision for lyric content.
//!
//! A line is dropped when any rule in [`RULES`] matches. Rules are
//! independent predicates over the trimmed line; the first match is reported
//! but the keep/drop outcome does not depend on their order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::services::script;

/// Structural and page-chrome words. Matched as case-insensitive substrings.
pub const DENYLIST: &[&str] = &[
    "contributors",
    "translations",
    "romanization",
    "english",
    "lyrics",
    "embed",
    "you might also like",
    "read more",
    "translation",
    "see",
    "traditional",
    "simplified",
    "chinese",
    "verse",
    "chorus",
    "bridge",
    "intro",
    "outro",
    "the song",
    "this song",
    "compares",
    "bitterness",
    "pain",
    "where",
    "series",
    "theme",
    "investigators",
    "mysterious",
    "homicides",
    "unnatural",
    "ame",
    "sansan",
    "king",
    "gnu",
];

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static BRACKET_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[.*\]$").unwrap());
static LATIN_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[a-zA-Z\s.,!?'"()\-:]+$"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    Empty,
    Denylisted,
    DigitsOnly,
    Ellipsis,
    BracketTag,
    NoJapanese,
    LatinOnly,
}

type Rule = (DropReason, fn(&str) -> bool);

pub const RULES: [Rule; 7] = [
    (DropReason::Empty, is_empty),
    (DropReason::Denylisted, has_denylisted_keyword),
    (DropReason::DigitsOnly, is_digits_only),
    (DropReason::Ellipsis, is_ellipsis),
    (DropReason::BracketTag, is_bracket_tag),
    (DropReason::NoJapanese, lacks_japanese),
    (DropReason::LatinOnly, is_latin_only),
];

pub fn is_empty(line: &str) -> bool {
    line.is_empty()
}

pub fn has_denylisted_keyword(line: &str) -> bool {
    let lower = line.to_lowercase();
    DENYLIST.iter().any(|kw| lower.contains(kw))
}

pub fn is_digits_only(line: &str) -> bool {
    DIGITS_ONLY.is_match(line)
}

pub fn is_ellipsis(line: &str) -> bool {
    line == "..."
}

pub fn is_bracket_tag(line: &str) -> bool {
    BRACKET_TAG.is_match(line)
}

pub fn lacks_japanese(line: &str) -> bool {
    !script::contains_japanese(line)
}

pub fn is_latin_only(line: &str) -> bool {
    LATIN_ONLY.is_match(line)
}

/// Returns the first rule that drops `line`, or `None` if it is lyric content.
pub fn classify(line: &str) -> Option<DropReason> {
    let trimmed = line.trim();
    RULES
        .iter()
        .find(|(_, rule)| rule(trimmed))
        .map(|(reason, _)| *reason)
}

pub fn keep(line: &str) -> bool {
    classify(line).is_none()
}
