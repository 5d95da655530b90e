//! Demo driver: runs one scripted session against the headless core.
//!
//! With `GEMINI_API_KEY` set (directly or via `.env`) the tutor answers
//! for real; without it the session degrades to the apology reply.

use std::sync::Arc;

use myndspace_core::app::StudyApp;
use myndspace_core::catalog::SubjectFilter;
use myndspace_core::session::camera::NullDevice;
use myndspace_core::session::chat::TutorRequestState;
use myndspace_core::tutor::{GeminiClient, TutorChat};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Non-fatal: tutor questions fall back to the apology when unconfigured.
    let tutor: Option<Arc<dyn TutorChat>> = match GeminiClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "tutor client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "tutor client not configured, replies degrade to apology");
            None
        }
    };

    let mut app = StudyApp::new(tutor, Arc::new(NullDevice));

    for room in app.filtered_rooms() {
        tracing::info!(
            room_id = %room.id,
            topic = %room.topic,
            subject = %room.subject,
            participants = room.participants,
            "listing"
        );
    }
    app.set_filter(SubjectFilter::All);

    let Some(first_id) = app.rooms().first().map(|r| r.id.clone()) else {
        tracing::error!("no seed rooms");
        return;
    };
    app.join(&first_id).await;
    let Some(session) = app.session() else {
        tracing::error!("join failed");
        return;
    };

    let mut revisions = session.subscribe();
    session.ask_tutor("Can you explain the chain rule in one paragraph?").await;

    // Wait for the reply to land (state returns to Idle), then print the thread.
    loop {
        let snapshot = session.snapshot().await;
        if snapshot.tutor_request == TutorRequestState::Idle && snapshot.tutor_thread.len >= 3 {
            for message in &snapshot.tutor_thread.messages {
                tracing::info!(sender = %message.sender_name, ai = message.is_ai, "{}", message.text);
            }
            break;
        }
        if revisions.changed().await.is_err() {
            break;
        }
    }

    app.leave().await;
    tracing::info!("done");
}
