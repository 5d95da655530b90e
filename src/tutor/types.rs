//! Tutor client types: error taxonomy and the provider-neutral trait.

use async_trait::async_trait;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by the tutor text-generation client.
///
/// These never reach a chat thread: the service layer in
/// [`crate::tutor`] converts every failure into a fixed apology string.
/// The typed error exists for logging and for tests.
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// TUTOR CHAT TRAIT
// =============================================================================

/// Provider-neutral async trait for one-shot text generation.
/// Enables mocking in tests.
#[async_trait]
pub trait TutorChat: Send + Sync {
    /// Generate a reply for `prompt` under the given system directive.
    ///
    /// # Errors
    ///
    /// Returns a [`TutorError`] if the request fails or the response is
    /// malformed.
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, TutorError>;
}
