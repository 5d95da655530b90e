//! Tutor configuration parsed from environment variables.

use super::types::TutorError;

pub const DEFAULT_TUTOR_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TUTOR_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TUTOR_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TUTOR_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: TutorTimeouts,
}

impl TutorConfig {
    /// Build typed tutor config from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`
    ///
    /// Optional:
    /// - `TUTOR_MODEL`: default `gemini-2.5-flash`
    /// - `TUTOR_BASE_URL`: default Google generative-language API base URL
    /// - `TUTOR_REQUEST_TIMEOUT_SECS`: default 60
    /// - `TUTOR_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`TutorError::MissingApiKey`] when the key is absent. Callers
    /// treat this as "tutor disabled", never as a crash.
    pub fn from_env() -> Result<Self, TutorError> {
        let api_key =
            std::env::var("GEMINI_API_KEY").map_err(|_| TutorError::MissingApiKey { var: "GEMINI_API_KEY".into() })?;

        let model = std::env::var("TUTOR_MODEL").unwrap_or_else(|_| DEFAULT_TUTOR_MODEL.to_string());
        let base_url = std::env::var("TUTOR_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TUTOR_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = TutorTimeouts {
            request_secs: env_parse_u64("TUTOR_REQUEST_TIMEOUT_SECS", DEFAULT_TUTOR_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("TUTOR_CONNECT_TIMEOUT_SECS", DEFAULT_TUTOR_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
