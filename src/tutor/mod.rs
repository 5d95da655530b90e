//! Tutor request client: one question in, one generated answer out.
//!
//! DESIGN
//! ======
//! A single-attempt call per user question: no retry, no backoff, no
//! cancellation plumbing below this layer. The service swallows every
//! provider failure into a fixed apology string so the chat thread only
//! ever receives normal-looking messages. The system directive embeds the
//! room subject plus a bounded window of recent conversation.

pub mod config;
pub mod gemini;
pub mod types;

use std::fmt::Write;
use std::sync::Arc;

use tracing::warn;

use crate::catalog::Subject;
use crate::session::chat::ChatMessage;
pub use gemini::GeminiClient;
pub use types::{TutorChat, TutorError};

/// Maximum prior turns embedded in the system directive.
const HISTORY_WINDOW: usize = 5;

/// Shown when the upstream call fails for any reason (network, auth, quota).
const APOLOGY: &str = "Sorry, I lost connection to the knowledge base. Please check your API key.";

/// Shown when the upstream call succeeds but returns no text.
const EMPTY_FALLBACK: &str = "I'm having trouble thinking right now. Let's try again.";

// =============================================================================
// SERVICE
// =============================================================================

/// Ask the tutor to answer the latest message in `history`.
///
/// Input contract: `history` is non-empty and its last element is the
/// user's new question. On any failure, including an unconfigured
/// client, the apology string is returned; callers never see a
/// structured error.
pub async fn ask(client: Option<&Arc<dyn TutorChat>>, history: &[ChatMessage], subject: Subject) -> String {
    let Some(client) = client else {
        warn!("tutor: not configured, degrading to apology");
        return APOLOGY.to_string();
    };
    let Some(question) = history.last() else {
        warn!("tutor: asked with empty history");
        return APOLOGY.to_string();
    };

    let system = build_system_prompt(history, subject);
    match client.generate(&system, &question.text).await {
        Ok(text) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "tutor: request failed");
            APOLOGY.to_string()
        }
    }
}

/// Synthesize the tutoring directive: role, subject, and up to the last
/// five turns of conversation context.
#[must_use]
pub fn build_system_prompt(history: &[ChatMessage], subject: Subject) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let mut context = String::new();
    for message in &history[start..] {
        let _ = writeln!(context, "{}: {}", message.sender_name, message.text);
    }

    format!(
        "You are a friendly and knowledgeable AI Study Tutor specializing in {subject}.\n\
         You are currently in a virtual study room with a student.\n\
         \n\
         Your goals:\n\
         1. Answer specific questions about {subject}.\n\
         2. Help break down complex topics.\n\
         3. If the user is chatting casually, encourage them gently to get back to focus \
         or suggest a study technique (like Pomodoro).\n\
         4. Keep answers concise (under 150 words) unless asked for a deep dive.\n\
         \n\
         Recent Chat Context:\n\
         {context}\n\
         Respond as the AI Tutor:"
    )
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
