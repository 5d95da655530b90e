//! Gemini `generateContent` API client.
//!
//! Thin HTTP wrapper for `models/{model}:generateContent`. Pure parsing in
//! `parse_response` for testability.

use std::time::Duration;

use super::config::{TutorConfig, TutorTimeouts};
use super::types::{TutorChat, TutorError};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: TutorConfig) -> Result<Self, TutorError> {
        let TutorConfig { api_key, model, base_url, timeouts } = config;
        let http = build_http(timeouts)?;
        Ok(Self { http, api_key, base_url, model })
    }

    /// Build a client from environment variables. See [`TutorConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, TutorError> {
        Self::from_config(TutorConfig::from_env()?)
    }

    /// Return the configured model name (e.g. `"gemini-2.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

fn build_http(timeouts: TutorTimeouts) -> Result<reqwest::Client, TutorError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| TutorError::HttpClientBuild(e.to_string()))
}

#[async_trait::async_trait]
impl TutorChat for GeminiClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, TutorError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = ApiRequest {
            contents: vec![ContentEntry { parts: vec![Part { text: prompt.to_string() }] }],
            system_instruction: ContentEntry { parts: vec![Part { text: system.to_string() }] },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TutorError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TutorError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(TutorError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest {
    contents: Vec<ContentEntry>,
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentEntry,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct ContentEntry {
    parts: Vec<Part>,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Part {
    text: String,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<ContentEntry>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Extract the generated text from a `generateContent` response body.
///
/// Joins all text parts of the first candidate. An empty candidate list
/// yields an empty string; the service layer substitutes fallback copy.
fn parse_response(json: &str) -> Result<String, TutorError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| TutorError::ApiParse(e.to_string()))?;

    let text = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    Ok(text)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
