use super::*;
use std::sync::Mutex;
use time::OffsetDateTime;

// =========================================================================
// Mocks
// =========================================================================

struct EchoTutor(&'static str);

#[async_trait::async_trait]
impl TutorChat for EchoTutor {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, TutorError> {
        Ok(self.0.to_string())
    }
}

struct FailTutor;

#[async_trait::async_trait]
impl TutorChat for FailTutor {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, TutorError> {
        Err(TutorError::ApiRequest("connection refused".into()))
    }
}

/// Records the system/prompt pair it was called with.
struct RecordingTutor {
    seen: Mutex<Option<(String, String)>>,
}

#[async_trait::async_trait]
impl TutorChat for RecordingTutor {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, TutorError> {
        *self.seen.lock().unwrap() = Some((system.to_string(), prompt.to_string()));
        Ok("noted".to_string())
    }
}

fn message(sender: &str, text: &str) -> ChatMessage {
    ChatMessage {
        id: 0,
        sender_id: sender.to_lowercase(),
        sender_name: sender.to_string(),
        text: text.to_string(),
        timestamp: OffsetDateTime::now_utc(),
        is_ai: false,
    }
}

// =========================================================================
// ask
// =========================================================================

#[tokio::test]
async fn ask_returns_generated_text() {
    let client: Arc<dyn TutorChat> = Arc::new(EchoTutor("A derivative measures change."));
    let history = vec![message("You", "What is a derivative?")];
    let reply = ask(Some(&client), &history, Subject::Mathematics).await;
    assert_eq!(reply, "A derivative measures change.");
}

#[tokio::test]
async fn ask_blank_generation_uses_fallback_copy() {
    let client: Arc<dyn TutorChat> = Arc::new(EchoTutor("   "));
    let history = vec![message("You", "Hello?")];
    let reply = ask(Some(&client), &history, Subject::Physics).await;
    assert_eq!(reply, EMPTY_FALLBACK);
}

#[tokio::test]
async fn ask_failure_is_swallowed_into_apology() {
    let client: Arc<dyn TutorChat> = Arc::new(FailTutor);
    let history = vec![message("You", "Hello?")];
    let reply = ask(Some(&client), &history, Subject::Physics).await;
    assert_eq!(reply, APOLOGY);
}

#[tokio::test]
async fn ask_without_client_degrades_to_apology() {
    let history = vec![message("You", "Hello?")];
    let reply = ask(None, &history, Subject::Physics).await;
    assert_eq!(reply, APOLOGY);
}

#[tokio::test]
async fn ask_sends_latest_text_as_prompt() {
    let recorder = Arc::new(RecordingTutor { seen: Mutex::new(None) });
    let client: Arc<dyn TutorChat> = Arc::clone(&recorder) as Arc<dyn TutorChat>;
    let history = vec![message("You", "First question"), message("You", "Second question")];
    ask(Some(&client), &history, Subject::Economics).await;

    let (system, prompt) = recorder.seen.lock().unwrap().take().expect("generate was called");
    assert_eq!(prompt, "Second question");
    assert!(system.contains("First question"), "earlier turns belong in the system prompt");
}

// =========================================================================
// build_system_prompt
// =========================================================================

#[test]
fn system_prompt_embeds_subject_and_role() {
    let history = vec![message("You", "hi")];
    let system = build_system_prompt(&history, Subject::ComputerScience);
    assert!(system.contains("AI Study Tutor"));
    assert!(system.contains("Computer Science"));
    assert!(system.contains("Pomodoro"));
}

#[test]
fn system_prompt_window_is_bounded_to_five_turns() {
    let history: Vec<ChatMessage> = (0..8).map(|i| message("You", &format!("turn-{i}"))).collect();
    let system = build_system_prompt(&history, Subject::Biology);
    assert!(!system.contains("turn-2"), "turns outside the window must be dropped");
    for i in 3..8 {
        assert!(system.contains(&format!("turn-{i}")), "turn-{i} should be in the window");
    }
}

#[test]
fn system_prompt_lines_are_name_prefixed() {
    let history = vec![message("You", "What is entropy?")];
    let system = build_system_prompt(&history, Subject::Physics);
    assert!(system.contains("You: What is entropy?"));
}
