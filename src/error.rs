//! Core error types.
//!
//! Every failure that crosses the protocol boundary is one of these variants;
//! `kind()` gives the stable tag the front end switches on.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Lyrics, song or video not located upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// Upstream API answered with a non-success status or a payload we could not use.
    #[error("provider error{}: {message}", status_suffix(.status))]
    Provider {
        status: Option<u16>,
        message: String,
    },

    /// Missing credential or unusable setting.
    #[error("configuration error: {message}. {hint}")]
    Config {
        message: String,
        hint: &'static str,
    },

    /// Reading or writing a persisted document failed.
    #[error("persistence error at {path:?}: {message}")]
    Persistence {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl CoreError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            status: None,
            message: message.into(),
        }
    }

    pub fn provider_status(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config {
            message: message.into(),
            hint,
        }
    }

    pub fn persistence(path: impl Into<Option<PathBuf>>, message: impl Into<String>) -> Self {
        Self::Persistence {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Provider { .. } => "provider",
            Self::Config { .. } => "config",
            Self::Persistence { .. } => "persistence",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        Self::persistence(None, e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::persistence(None, format!("invalid json: {e}"))
    }
}

// Transport failures (DNS, TLS, timeout) count as the provider failing.
impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        Self::Provider {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(CoreError::NotFound("x".into()).kind(), "not_found");
        assert_eq!(CoreError::provider("x").kind(), "provider");
        assert_eq!(CoreError::config("x", "y").kind(), "config");
        assert_eq!(CoreError::persistence(None, "x").kind(), "persistence");
        assert_eq!(CoreError::InvalidRequest("x".into()).kind(), "invalid_request");
    }

    #[test]
    fn provider_status_is_rendered() {
        let err = CoreError::provider_status(429, "quota exceeded");
        assert_eq!(err.to_string(), "provider error (HTTP 429): quota exceeded");

        let err = CoreError::provider("bad payload");
        assert_eq!(err.to_string(), "provider error: bad payload");
    }

    #[test]
    fn config_error_carries_hint() {
        let err = CoreError::config(
            "GEMINI_API_KEY is not set",
            "Export GEMINI_API_KEY or add it to .env",
        );
        assert!(err.to_string().contains("Export GEMINI_API_KEY"));
    }
}
