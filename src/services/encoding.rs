//! Encoding detection for lyrics files saved outside the app.
//!
//! Japanese lyric files in the wild are often Shift_JIS rather than UTF-8.

use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

use crate::error::{CoreError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Serialize)]
pub struct EncodingCandidate {
    pub name: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct EncodingDetectionResult {
    pub best: String,
    pub confidence: f32,
    pub candidates: Vec<EncodingCandidate>,
}

#[derive(Debug, Serialize)]
pub struct DecodedLyrics {
    pub encoding: String,
    pub text: String,
    /// Whether malformed sequences were replaced while decoding.
    pub lossy: bool,
}

pub fn detect_from_file(path: &Path) -> Result<EncodingDetectionResult> {
    let bytes = read(path)?;
    Ok(detect(&bytes))
}

pub fn detect(bytes: &[u8]) -> EncodingDetectionResult {
    if bytes.starts_with(UTF8_BOM) {
        return EncodingDetectionResult {
            best: "utf-8-sig".into(),
            confidence: 0.99,
            candidates: vec![
                candidate("utf-8-sig", 0.99),
                candidate("utf-8", 0.90),
            ],
        };
    }

    let encoding = guess(bytes);
    let best = encoding.name().to_lowercase();
    let confidence = estimate_confidence(bytes, encoding);

    let mut candidates = vec![candidate(&best, confidence)];

    // Shift_JIS files are frequently really CP932 with vendor extensions.
    match best.as_str() {
        "shift_jis" => {
            candidates.push(candidate("windows-31j", (confidence - 0.03).max(0.0)));
            candidates.push(candidate("cp932", (confidence - 0.05).max(0.0)));
        }
        "euc-jp" => {
            candidates.push(candidate("shift_jis", (confidence - 0.10).max(0.0)));
        }
        "utf-8" => {
            candidates.push(candidate("utf-8-sig", (confidence - 0.20).max(0.0)));
        }
        _ => {}
    }

    EncodingDetectionResult {
        best,
        confidence,
        candidates,
    }
}

/// Reads a lyrics file and decodes it with the detected encoding.
pub fn decode_lyrics_file(path: &Path) -> Result<DecodedLyrics> {
    let bytes = read(path)?;
    Ok(decode(&bytes))
}

pub fn decode(bytes: &[u8]) -> DecodedLyrics {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        let (text, _, lossy) = UTF_8.decode(rest);
        return DecodedLyrics {
            encoding: "utf-8-sig".into(),
            text: text.into_owned(),
            lossy,
        };
    }

    let encoding = guess(bytes);
    let (text, _, lossy) = encoding.decode(bytes);
    if lossy {
        tracing::warn!(encoding = encoding.name(), "lyrics file decoded with replacements");
    }

    DecodedLyrics {
        encoding: encoding.name().to_lowercase(),
        text: text.into_owned(),
        lossy,
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| CoreError::persistence(path.to_path_buf(), e.to_string()))
}

fn guess(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(Some(b"jp".as_slice()), true)
}

fn candidate(name: &str, confidence: f32) -> EncodingCandidate {
    EncodingCandidate {
        name: name.to_string(),
        confidence,
    }
}

fn estimate_confidence(bytes: &[u8], encoding: &'static Encoding) -> f32 {
    let (text, _, had_errors) = encoding.decode(bytes);

    if had_errors {
        return 0.35;
    }

    let len = text.len();
    if len < 64 {
        0.55
    } else if len < 512 {
        0.70
    } else if len < 4096 {
        0.82
    } else {
        0.90
    }
}
