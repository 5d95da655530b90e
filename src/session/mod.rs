//! Room session: the in-room state tree, composed from independent parts.
//!
//! DESIGN
//! ======
//! One `RoomSession` exists per join/leave lifetime. It owns the chat
//! threads, widget panels, countdown timer, and presence controller as
//! side-by-side state machines behind a single `RwLock`, plus the spawned
//! tasks that complete asynchronously (tutor reply, capture grant, 1 Hz
//! timer notifier, simulated matching/refresh delays).
//!
//! STALE COMPLETIONS
//! =================
//! Every spawned completion captures the session epoch at submit time and
//! re-checks it under the write lock before applying. `shutdown` bumps the
//! epoch first, then aborts what can be aborted. The capture-grant task is
//! deliberately not aborted: it must run to completion so a handle granted
//! after teardown is stopped rather than leaked.
//!
//! PRESENTATION BOUNDARY
//! =====================
//! Consumers read cloneable [`SessionSnapshot`]s and subscribe to a watch
//! channel that carries a bare revision counter; every mutation bumps it.
//! No rendering detail leaks into this module.

pub mod camera;
pub mod chat;
pub mod timer;
pub mod widgets;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::catalog::{Scene, StudyRoomListing, Subject, scene_or_default};
use crate::tutor::{self, TutorChat};
use camera::{CameraController, CameraView, CaptureDevice};
use chat::{ChatThread, SubmitOutcome, TutorRequestState};
use timer::{PomodoroTimer, TimerView};
use widgets::{MusicPlayer, SearchPanel, SettingsPanel, WidgetKind, WidgetPanels};

/// Simulated partner-matching delay.
const MATCHING_DELAY: Duration = Duration::from_secs(4);
/// Simulated dashboard refresh delay.
const REFRESH_DELAY: Duration = Duration::from_secs(1);

// =============================================================================
// CONFIG
// =============================================================================

/// Session configuration built once at join time and never mutated
/// afterward. Scene changes are local to the session, not written back.
#[derive(Debug, Clone)]
pub struct RoomSessionConfig {
    pub listing: StudyRoomListing,
    pub scene_id: String,
    pub mic_on: bool,
    pub video_on: bool,
}

// =============================================================================
// STATE
// =============================================================================

struct SessionState {
    scene: Scene,
    widgets: WidgetPanels,
    music: MusicPlayer,
    search: SearchPanel,
    settings: SettingsPanel,
    tutor_thread: ChatThread,
    public_thread: ChatThread,
    tutor_request: TutorRequestState,
    timer: PomodoroTimer,
    camera: CameraController,
    matching: bool,
    refreshing: bool,
    tasks: SessionTasks,
}

/// Handles to the session's background work, so teardown can cancel it.
#[derive(Default)]
struct SessionTasks {
    tutor: Option<JoinHandle<()>>,
    ticker: Option<JoinHandle<()>>,
    camera: Option<JoinHandle<()>>,
    matching: Option<JoinHandle<()>>,
    refresh: Option<JoinHandle<()>>,
}

struct SessionShared {
    state: RwLock<SessionState>,
    /// Bumped on teardown; completions tagged with an older value are dropped.
    epoch: AtomicU64,
    revision: watch::Sender<u64>,
    device: Arc<dyn CaptureDevice>,
    tutor: Option<Arc<dyn TutorChat>>,
    subject: Subject,
}

impl SessionShared {
    fn bump_revision(&self) {
        self.revision.send_modify(|r| *r += 1);
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// The live state of being inside one study room.
pub struct RoomSession {
    id: Uuid,
    config: RoomSessionConfig,
    shared: Arc<SessionShared>,
}

impl RoomSession {
    /// Build a session from its join-time config. The tutor thread is
    /// seeded with the system welcome; the public thread starts empty.
    #[must_use]
    pub fn new(
        config: RoomSessionConfig,
        tutor: Option<Arc<dyn TutorChat>>,
        device: Arc<dyn CaptureDevice>,
    ) -> Self {
        let subject = config.listing.subject;
        let mut tutor_thread = ChatThread::new();
        tutor_thread.push(
            "system",
            "System",
            format!("Welcome to MyndSpace. I am your AI Tutor for {subject}. How can I help?"),
            true,
        );

        let state = SessionState {
            scene: scene_or_default(&config.scene_id),
            widgets: WidgetPanels::new(),
            music: MusicPlayer::default(),
            search: SearchPanel::default(),
            settings: SettingsPanel::default(),
            tutor_thread,
            public_thread: ChatThread::new(),
            tutor_request: TutorRequestState::Idle,
            timer: PomodoroTimer::new(),
            camera: CameraController::new(config.mic_on),
            matching: false,
            refreshing: false,
            tasks: SessionTasks::default(),
        };

        let (revision, _) = watch::channel(0);
        Self {
            id: Uuid::new_v4(),
            config,
            shared: Arc::new(SessionShared {
                state: RwLock::new(state),
                epoch: AtomicU64::new(0),
                revision,
                device,
                tutor,
                subject,
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &RoomSessionConfig {
        &self.config
    }

    /// Subscribe to snapshot revisions. The payload is a bare counter;
    /// subscribers re-read [`Self::snapshot`] on change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.revision.subscribe()
    }

    fn touch(&self) {
        self.shared.bump_revision();
    }

    fn epoch(&self) -> u64 {
        self.shared.epoch.load(Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Chat
    // -------------------------------------------------------------------------

    /// Append a message to the public thread. Blank input is a no-op.
    pub async fn send_public(&self, text: &str) -> SubmitOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::EmptyInput;
        }
        {
            let mut st = self.shared.state.write().await;
            st.public_thread
                .push(chat::LOCAL_SENDER_ID, chat::LOCAL_SENDER_NAME, trimmed.to_string(), false);
        }
        self.touch();
        SubmitOutcome::Sent
    }

    /// Ask the tutor a question: the user message is appended immediately
    /// (optimistic insert), then the reply arrives asynchronously as an
    /// AI-tagged message. At most one request is outstanding; a submit
    /// while awaiting is dropped and reported as `Busy`.
    pub async fn ask_tutor(&self, text: &str) -> SubmitOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::EmptyInput;
        }

        let epoch = self.epoch();
        let history = {
            let mut st = self.shared.state.write().await;
            if st.tutor_request == TutorRequestState::Awaiting {
                return SubmitOutcome::Busy;
            }
            st.tutor_thread
                .push(chat::LOCAL_SENDER_ID, chat::LOCAL_SENDER_NAME, trimmed.to_string(), false);
            st.tutor_request = TutorRequestState::Awaiting;
            st.tutor_thread.messages().to_vec()
        };
        self.touch();
        info!(session_id = %self.id, thread_len = history.len(), "tutor question submitted");

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let reply = tutor::ask(shared.tutor.as_ref(), &history, shared.subject).await;
            if shared.epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            let mut st = shared.state.write().await;
            if shared.epoch.load(Ordering::SeqCst) != epoch {
                return;
            }
            st.tutor_thread
                .push(chat::TUTOR_SENDER_ID, chat::TUTOR_SENDER_NAME, reply, true);
            st.tutor_request = TutorRequestState::Idle;
            st.tasks.tutor = None;
            drop(st);
            shared.bump_revision();
        });

        let mut st = self.shared.state.write().await;
        // The reply may already have landed; only track a still-pending request.
        if st.tutor_request == TutorRequestState::Awaiting {
            st.tasks.tutor = Some(handle);
        }
        SubmitOutcome::Sent
    }

    // -------------------------------------------------------------------------
    // Scene + widgets
    // -------------------------------------------------------------------------

    /// Activate a scene from the catalog and dismiss the background
    /// gallery as one atomic action. Unknown ids are ignored.
    pub async fn select_scene(&self, scene_id: &str) -> bool {
        let Some(scene) = crate::catalog::scenes().iter().find(|s| s.id == scene_id) else {
            return false;
        };
        {
            let mut st = self.shared.state.write().await;
            st.scene = scene.clone();
            st.widgets.close(WidgetKind::BackgroundGallery);
        }
        self.touch();
        true
    }

    pub async fn toggle_widget(&self, kind: WidgetKind) -> bool {
        let open = self.shared.state.write().await.widgets.toggle(kind);
        self.touch();
        open
    }

    pub async fn open_widget(&self, kind: WidgetKind) {
        self.shared.state.write().await.widgets.open(kind);
        self.touch();
    }

    pub async fn close_widget(&self, kind: WidgetKind) {
        self.shared.state.write().await.widgets.close(kind);
        self.touch();
    }

    pub async fn toggle_music(&self) -> bool {
        let playing = self.shared.state.write().await.music.toggle();
        self.touch();
        playing
    }

    pub async fn set_search_query(&self, query: &str) {
        self.shared.state.write().await.search.set_query(query);
        self.touch();
    }

    pub async fn toggle_notifications(&self) {
        let mut st = self.shared.state.write().await;
        st.settings.notifications = !st.settings.notifications;
        drop(st);
        self.touch();
    }

    pub async fn toggle_background_blur(&self) {
        let mut st = self.shared.state.write().await;
        st.settings.background_blur = !st.settings.background_blur;
        drop(st);
        self.touch();
    }

    pub async fn set_ambient_volume(&self, volume: i32) {
        self.shared.state.write().await.settings.set_ambient_volume(volume);
        self.touch();
    }

    // -------------------------------------------------------------------------
    // Timer
    // -------------------------------------------------------------------------

    /// Start the countdown. Idempotent; a second start while running never
    /// creates a second tick source.
    pub async fn start_timer(&self) {
        let epoch = self.epoch();
        let mut st = self.shared.state.write().await;
        let now = Instant::now();
        if !st.timer.start(now) {
            return;
        }
        info!(session_id = %self.id, remaining = st.timer.remaining(now), "timer started");
        if st.tasks.ticker.is_none() {
            let shared = Arc::clone(&self.shared);
            st.tasks.ticker = Some(tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(1));
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // First tick completes immediately; skip it.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    if shared.epoch.load(Ordering::SeqCst) != epoch {
                        return;
                    }
                    let mut st = shared.state.write().await;
                    let now = Instant::now();
                    st.timer.settle(now);
                    let running = st.timer.is_running(now);
                    if !running {
                        st.tasks.ticker = None;
                    }
                    drop(st);
                    shared.bump_revision();
                    if !running {
                        return;
                    }
                }
            }));
        }
        drop(st);
        self.touch();
    }

    /// Pause the countdown, cancelling the tick source.
    pub async fn pause_timer(&self) {
        let mut st = self.shared.state.write().await;
        let now = Instant::now();
        st.timer.pause(now);
        info!(session_id = %self.id, remaining = st.timer.remaining(now), "timer paused");
        if let Some(ticker) = st.tasks.ticker.take() {
            ticker.abort();
        }
        drop(st);
        self.touch();
    }

    /// Stop the clock and restore the configured session length.
    pub async fn reset_timer(&self) {
        let mut st = self.shared.state.write().await;
        st.timer.reset();
        if let Some(ticker) = st.tasks.ticker.take() {
            ticker.abort();
        }
        drop(st);
        self.touch();
    }

    // -------------------------------------------------------------------------
    // Presence / camera
    // -------------------------------------------------------------------------

    /// Set the user's wish for a live video feed. Activation requests a
    /// capture handle asynchronously; deactivation releases any held
    /// handle before returning and invalidates in-flight grants.
    pub async fn set_camera_active(&self, active: bool) {
        if !active {
            self.shared.state.write().await.camera.deactivate();
            self.touch();
            return;
        }

        let epoch = self.epoch();
        let generation = {
            let mut st = self.shared.state.write().await;
            st.camera.begin_request()
        };
        self.touch();

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            let result = shared.device.acquire().await;
            let mut st = shared.state.write().await;
            if shared.epoch.load(Ordering::SeqCst) != epoch {
                // Session is gone; a late grant must still be released.
                if let Ok(track) = result {
                    track.stop();
                }
                return;
            }
            match result {
                Ok(track) => {
                    st.camera.grant(generation, track);
                }
                Err(e) => st.camera.deny(generation, &e),
            }
            st.tasks.camera = None;
            drop(st);
            shared.bump_revision();
        });
        self.shared.state.write().await.tasks.camera = Some(handle);
    }

    /// Adjust the camera preview size by `delta`, clamped to `[0, 2]`.
    pub async fn resize_preview(&self, delta: i32) {
        self.shared.state.write().await.camera.resize_preview(delta);
        self.touch();
    }

    pub async fn toggle_mic(&self) -> bool {
        let on = self.shared.state.write().await.camera.toggle_mic();
        self.touch();
        on
    }

    pub async fn toggle_screen_share(&self) -> bool {
        let on = self.shared.state.write().await.camera.toggle_screen_share();
        self.touch();
        on
    }

    // -------------------------------------------------------------------------
    // Transient overlays
    // -------------------------------------------------------------------------

    /// Raise the partner-matching overlay; it clears itself after the
    /// simulated delay unless cancelled.
    pub async fn begin_matching(&self) {
        let epoch = self.epoch();
        {
            let mut st = self.shared.state.write().await;
            if st.matching {
                return;
            }
            st.matching = true;
            let shared = Arc::clone(&self.shared);
            st.tasks.matching = Some(tokio::spawn(async move {
                tokio::time::sleep(MATCHING_DELAY).await;
                if shared.epoch.load(Ordering::SeqCst) != epoch {
                    return;
                }
                let mut st = shared.state.write().await;
                st.matching = false;
                st.tasks.matching = None;
                drop(st);
                shared.bump_revision();
            }));
        }
        self.touch();
    }

    pub async fn cancel_matching(&self) {
        let mut st = self.shared.state.write().await;
        if let Some(task) = st.tasks.matching.take() {
            task.abort();
        }
        st.matching = false;
        drop(st);
        self.touch();
    }

    /// Raise the transient refresh indicator for one second.
    pub async fn refresh(&self) {
        let epoch = self.epoch();
        {
            let mut st = self.shared.state.write().await;
            if st.refreshing {
                return;
            }
            st.refreshing = true;
            let shared = Arc::clone(&self.shared);
            st.tasks.refresh = Some(tokio::spawn(async move {
                tokio::time::sleep(REFRESH_DELAY).await;
                if shared.epoch.load(Ordering::SeqCst) != epoch {
                    return;
                }
                let mut st = shared.state.write().await;
                st.refreshing = false;
                st.tasks.refresh = None;
                drop(st);
                shared.bump_revision();
            }));
        }
        self.touch();
    }

    // -------------------------------------------------------------------------
    // Snapshot + teardown
    // -------------------------------------------------------------------------

    /// Cloneable view of the whole session for the presentation layer.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let st = self.shared.state.read().await;
        let now = Instant::now();
        SessionSnapshot {
            session_id: self.id,
            room: self.config.listing.clone(),
            scene: st.scene.clone(),
            widgets: st.widgets.iter().collect(),
            music: st.music.clone(),
            search_query: st.search.query.clone(),
            searching: st.search.is_searching(),
            settings: st.settings.clone(),
            tutor_thread: ThreadView::of(&st.tutor_thread),
            public_thread: ThreadView::of(&st.public_thread),
            tutor_request: st.tutor_request,
            timer: st.timer.view(now),
            camera: st.camera.view(),
            matching: st.matching,
            refreshing: st.refreshing,
        }
    }

    /// Tear the session down: invalidate in-flight completions, cancel
    /// background work, and release the capture handle. Idempotent.
    ///
    /// The capture-grant task is not aborted; it runs to its epoch check
    /// so a handle granted after this call is stopped, not bound.
    pub async fn shutdown(&self) {
        self.shared.epoch.fetch_add(1, Ordering::SeqCst);

        let mut st = self.shared.state.write().await;
        for task in [st.tasks.tutor.take(), st.tasks.ticker.take(), st.tasks.matching.take(), st.tasks.refresh.take()]
            .into_iter()
            .flatten()
        {
            task.abort();
        }
        st.tasks.camera = None;
        st.camera.deactivate();
        st.timer.reset();
        st.tutor_request = TutorRequestState::Idle;
        st.matching = false;
        st.refreshing = false;
        drop(st);
        self.touch();
        info!(session_id = %self.id, "session torn down");
    }
}

// =============================================================================
// SNAPSHOT TYPES
// =============================================================================

/// View of one chat thread: the log plus the growth markers consumers use
/// to detect new messages.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadView {
    pub messages: Vec<chat::ChatMessage>,
    pub len: usize,
    pub last_id: Option<u64>,
}

impl ThreadView {
    fn of(thread: &ChatThread) -> Self {
        Self { messages: thread.messages().to_vec(), len: thread.len(), last_id: thread.last_id() }
    }
}

/// Presentation-facing snapshot of the whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub room: StudyRoomListing,
    pub scene: Scene,
    pub widgets: Vec<(WidgetKind, bool)>,
    pub music: MusicPlayer,
    pub search_query: String,
    pub searching: bool,
    pub settings: SettingsPanel,
    pub tutor_thread: ThreadView,
    pub public_thread: ThreadView,
    pub tutor_request: TutorRequestState,
    pub timer: TimerView,
    pub camera: CameraView,
    pub matching: bool,
    pub refreshing: bool,
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
