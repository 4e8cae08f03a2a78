use std::fmt;

use serde::Serialize;

use super::{blocks, classify};

/// Newline-joined lyric lines, each of which passes [`classify::keep`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CleanedLyrics(String);

impl CleanedLyrics {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }
}

impl fmt::Display for CleanedLyrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn normalize(raw: &str) -> CleanedLyrics {
    if raw.is_empty() {
        return CleanedLyrics::default();
    }

    let stripped = blocks::strip_all(raw);

    let kept: Vec<&str> = stripped
        .split('\n')
        .map(str::trim)
        .filter(|line| classify::keep(line))
        .collect();

    CleanedLyrics(kept.join("\n"))
}
