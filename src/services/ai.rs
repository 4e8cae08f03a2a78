use std::collections::BTreeMap;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::services::ai_types::{Evaluation, GenerateRequest, GenerateResponse};

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Anything that can turn a single word into a short translation.
pub trait TranslationProvider {
    fn translate(&self, word: &str) -> Result<String>;
}

/// Grades a learner's line-by-line translation of a lyric.
pub trait Evaluator {
    fn evaluate(&self, lyrics: &[String], translations: &BTreeMap<usize, String>)
        -> Result<Evaluation>;
}

pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    target_language: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            target_language: config.target_language.clone(),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            CoreError::config(
                "GEMINI_API_KEY is not set",
                "Export GEMINI_API_KEY or add it to .env",
            )
        })
    }

    /// One prompt in, first candidate's text out. Not retried.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let key = self.api_key()?;
        let url = format!("{GEMINI_BASE}/{}:generateContent", self.model);

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling gemini");

        let resp = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .json(&GenerateRequest::single(prompt))
            .send()?;

        let status = resp.status();
        let text = resp.text()?;

        if !status.is_success() {
            return Err(CoreError::provider_status(
                status.as_u16(),
                extract_error_message(status, &text),
            ));
        }

        parse_generate_response(&text)
    }
}

impl TranslationProvider for GeminiClient {
    fn translate(&self, word: &str) -> Result<String> {
        let answer = self.generate(&translate_prompt(word, &self.target_language))?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(CoreError::provider("empty translation from AI"));
        }
        Ok(answer.to_string())
    }
}

impl Evaluator for GeminiClient {
    fn evaluate(
        &self,
        lyrics: &[String],
        translations: &BTreeMap<usize, String>,
    ) -> Result<Evaluation> {
        let prompt = evaluation_prompt(lyrics, translations, &self.target_language)?;
        let evaluation = self.generate(&prompt)?;
        let score = extract_score(&evaluation);
        Ok(Evaluation { evaluation, score })
    }
}

pub fn parse_generate_response(body: &str) -> Result<String> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| CoreError::provider(format!("invalid JSON from AI: {e}")))?;

    parsed
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| {
            CoreError::provider("invalid AI response: missing candidates[0].content.parts[0].text")
        })
}

pub fn translate_prompt(word: &str, target_language: &str) -> String {
    format!(
        "Translate the following Japanese word into {target_language}. \
         Answer with only the most common meaning, on one line:\n\n{}",
        word.trim()
    )
}

pub fn evaluation_prompt(
    lyrics: &[String],
    translations: &BTreeMap<usize, String>,
    target_language: &str,
) -> Result<String> {
    let mut p = format!(
        "Below are Japanese song lyrics and a learner's {target_language} translation. \
         Evaluate the accuracy of the translation, give a score out of 100 and feedback. \
         Write the feedback in {target_language}.\n\n"
    );

    let mut listed = 0usize;
    for (&idx, translation) in translations {
        let Some(line) = lyrics.get(idx) else {
            tracing::warn!(
                index = idx,
                lines = lyrics.len(),
                "translation for missing lyric line skipped"
            );
            continue;
        };
        p.push_str(&format!("Line {}: {}\n", idx + 1, line));
        p.push_str(&format!("Translation: {}\n\n", translation.trim()));
        listed += 1;
    }

    if listed == 0 {
        return Err(CoreError::InvalidRequest(
            "no translations match the given lyrics".into(),
        ));
    }

    p.push_str(
        "\nFormat:\nScore: X/100\n\nFeedback:\n- Strengths:\n- To improve:\n- Suggested phrasing:",
    );
    Ok(p)
}

static SCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*점|(\d+)\s*/\s*100|점수[:\s]*(\d+)|score[:\s]*(\d+)").unwrap()
});

/// First score-looking number in an evaluation text, if it is within 0..=100.
pub fn extract_score(text: &str) -> Option<u32> {
    let caps = SCORE.captures(text)?;
    let raw = (1..=4).find_map(|i| caps.get(i))?.as_str();
    raw.parse::<u32>().ok().filter(|s| *s <= 100)
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.is_empty() {
        return format!("{status}");
    }

    match trimmed.char_indices().nth(400) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"꿈\n"}],"role":"model"}}]}"#;
        assert_eq!(parse_generate_response(body).unwrap(), "꿈\n");
    }

    #[test]
    fn missing_candidates_is_a_provider_error() {
        let bodies = [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
        ];
        for body in bodies {
            let err = parse_generate_response(body).unwrap_err();
            assert_eq!(err.kind(), "provider", "{body}");
        }
        assert_eq!(parse_generate_response("not json").unwrap_err().kind(), "provider");
    }

    #[test]
    fn error_message_prefers_api_error_field() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            extract_error_message(StatusCode::BAD_REQUEST, body),
            "API key not valid"
        );
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let client = GeminiClient::new(&Config::default()).unwrap();
        let err = client.translate("夢").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn evaluation_prompt_lists_translated_lines_in_order() {
        let lyrics = vec!["夢ならば".to_string(), "まだ見てる".to_string()];
        let mut translations = BTreeMap::new();
        translations.insert(1, "still dreaming".to_string());
        translations.insert(0, " if only a dream ".to_string());
        translations.insert(7, "ghost".to_string());

        let p = evaluation_prompt(&lyrics, &translations, "English").unwrap();
        let first = p.find("Line 1: 夢ならば\nTranslation: if only a dream").unwrap();
        let second = p.find("Line 2: まだ見てる\nTranslation: still dreaming").unwrap();
        assert!(first < second);
        assert!(!p.contains("ghost"));
        assert!(p.contains("Score: X/100"));
    }

    #[test]
    fn evaluation_prompt_needs_at_least_one_line() {
        let err = evaluation_prompt(&[], &BTreeMap::new(), "Korean").unwrap_err();
        assert_eq!(err.kind(), "invalid_request");
    }

    #[test]
    fn score_extraction() {
        assert_eq!(extract_score("점수: 85점/100점"), Some(85));
        assert_eq!(extract_score("Score: 72/100\nFeedback: ..."), Some(72));
        assert_eq!(extract_score("score 90"), Some(90));
        assert_eq!(extract_score("총 점수: 64"), Some(64));
        assert_eq!(extract_score("no number here"), None);
        assert_eq!(extract_score("Score: 450/1000"), None);
    }

    #[test]
    fn translate_prompt_names_the_language() {
        let p = translate_prompt(" 夢 ", "Korean");
        assert!(p.contains("into Korean"));
        assert!(p.ends_with("\n\n夢"));
    }
}
