//! Process configuration.
//!
//! Loaded once at startup from the environment (and a `.env` file if one is
//! present). Missing provider keys are not fatal here; the provider that
//! needs them reports a configuration error when it is first used.

use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
const DEFAULT_TARGET_LANGUAGE: &str = "Korean";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub genius_token: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub youtube_api_key: Option<String>,
    /// Language the learner translates into; used in AI prompts.
    pub target_language: String,
    pub data_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genius_token: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            youtube_api_key: None,
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            data_dir: default_data_dir(),
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();

        let mut config = Self::default();

        config.genius_token = non_empty_var("GENIUS_ACCESS_TOKEN");
        config.gemini_api_key = non_empty_var("GEMINI_API_KEY");
        config.youtube_api_key = non_empty_var("YOUTUBE_API_KEY");

        if let Some(model) = non_empty_var("GEMINI_MODEL") {
            config.gemini_model = model;
        }

        if let Some(lang) = non_empty_var("KASHI_TARGET_LANGUAGE") {
            config.target_language = lang;
        }

        if let Some(dir) = non_empty_var("KASHI_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(secs) = non_empty_var("KASHI_HTTP_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(v) if v > 0 => config.http_timeout_secs = v,
                _ => tracing::warn!(value = %secs, "ignoring invalid KASHI_HTTP_TIMEOUT_SECS"),
            }
        }

        config
    }

    pub fn dictionary_path(&self) -> PathBuf {
        self.data_dir.join("translations.json")
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.data_dir.join("vocabulary.json")
    }

    pub fn study_history_path(&self) -> PathBuf {
        self.data_dir.join("study_history.json")
    }

    pub fn evaluation_history_path(&self) -> PathBuf {
        self.data_dir.join("evaluation_history.json")
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_data_dir() -> PathBuf {
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("data")
}
