//! Typed request payloads.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::model::token::Token;

pub fn parse<T: DeserializeOwned>(payload: &Value) -> Result<T> {
    let value = if payload.is_null() {
        Value::Object(Default::default())
    } else {
        payload.clone()
    };
    serde_json::from_value(value)
        .map_err(|e| CoreError::InvalidRequest(format!("invalid payload: {e}")))
}

#[derive(Debug, Deserialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct Line {
    pub line: String,
}

#[derive(Debug, Deserialize)]
pub struct FilePath {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct Id {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
}

#[derive(Debug, Deserialize)]
pub struct Search {
    pub q: String,
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

#[derive(Debug, Deserialize)]
pub struct Record {
    pub text: String,
    pub translation: String,
}

/// Lyrics may arrive as a line array or as one newline-joined string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LyricsLines {
    Lines(Vec<String>),
    Joined(String),
}

impl LyricsLines {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            LyricsLines::Lines(lines) => lines,
            LyricsLines::Joined(text) => text
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Evaluate {
    pub lyrics: LyricsLines,
    pub translations: BTreeMap<usize, String>,
}

#[derive(Debug, Deserialize)]
pub struct AddWord {
    pub token: Token,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStudy {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub translation_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddEvaluation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub translations: BTreeMap<usize, String>,
    pub evaluation: String,
    #[serde(default)]
    pub score: Option<u32>,
}

