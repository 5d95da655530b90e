//! Chat thread store: two append-only message logs per room session.
//!
//! DESIGN
//! ======
//! A thread is an ordered, append-only log; messages are immutable once
//! created and ids are a per-thread monotonic sequence, so insertion order
//! is observable from ids alone. Timestamps are non-decreasing within a
//! thread: a wall-clock step backwards is clamped to the previous message's
//! timestamp rather than breaking the ordering invariant.
//!
//! The tutor request lifecycle (`Idle`/`Awaiting`) lives next to the tutor
//! thread because the two transition together: the optimistic user insert
//! flips the state to `Awaiting`, and the reply (or apology) append flips
//! it back.

use serde::Serialize;
use time::OffsetDateTime;

/// Sender id used for messages typed by the local user.
pub const LOCAL_SENDER_ID: &str = "user";
/// Display name for the local user inside a room.
pub const LOCAL_SENDER_NAME: &str = "You";
/// Sender id for generated tutor replies.
pub const TUTOR_SENDER_ID: &str = "ai";
/// Display name for the tutor.
pub const TUTOR_SENDER_NAME: &str = "MyndAI";

// =============================================================================
// MESSAGE
// =============================================================================

/// A single immutable chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Unique within the owning thread; strictly increasing in insertion order.
    pub id: u64,
    pub sender_id: String,
    pub sender_name: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub is_ai: bool,
}

// =============================================================================
// THREAD
// =============================================================================

/// One conversation channel: an append-only log with monotonic timestamps.
#[derive(Debug, Default)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatThread {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it.
    ///
    /// Timestamps are clamped so they never decrease within the thread.
    pub fn push(&mut self, sender_id: &str, sender_name: &str, text: String, is_ai: bool) -> &ChatMessage {
        let mut timestamp = OffsetDateTime::now_utc();
        if let Some(last) = self.messages.last() {
            if timestamp < last.timestamp {
                timestamp = last.timestamp;
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender_id: sender_id.to_string(),
            sender_name: sender_name.to_string(),
            text,
            timestamp,
            is_ai,
        });
        // Just pushed, so last() is always Some.
        &self.messages[self.messages.len() - 1]
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Id of the newest message, if any. Consumers compare this across
    /// snapshots to detect growth (scroll-to-bottom is their concern).
    #[must_use]
    pub fn last_id(&self) -> Option<u64> {
        self.messages.last().map(|m| m.id)
    }
}

// =============================================================================
// TUTOR REQUEST STATE
// =============================================================================

/// Lifecycle of the single in-flight tutor request.
///
/// At most one request is outstanding at a time; a submit while `Awaiting`
/// is dropped (reported as [`SubmitOutcome::Busy`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TutorRequestState {
    #[default]
    Idle,
    Awaiting,
}

/// Result of a send operation on either thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The message was appended.
    Sent,
    /// Blank or whitespace-only input; nothing appended.
    EmptyInput,
    /// A tutor request is already outstanding; nothing appended.
    Busy,
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
