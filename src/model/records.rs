use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub base_form: String,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub song_title: String,
    #[serde(default)]
    pub song_artist: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecord {
    pub id: String,
    pub song_title: String,
    pub song_artist: String,
    pub translation_count: usize,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub id: String,
    pub song_title: String,
    pub song_artist: String,
    /// Lyric line index → the learner's translation of that line.
    #[serde(default)]
    pub translations: BTreeMap<usize, String>,
    pub evaluation: String,
    #[serde(default)]
    pub score: Option<u32>,
    pub date: DateTime<Utc>,
}
