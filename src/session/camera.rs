//! Presence controller: local capture lifecycle, preview sizing, AV flags.
//!
//! DESIGN
//! ======
//! Two facts are tracked separately: `intent` (what the user asked for)
//! and `feed` (what the platform actually granted). Permission denial
//! leaves intent true and the feed in `Denied`: observable, logged by the
//! session, never fatal to room entry.
//!
//! Acquisition is asynchronous, so every request carries a generation
//! number. A grant that arrives for a stale generation (the user toggled
//! off, toggled again, or the session tore down while the platform was
//! deciding) is stopped on the spot instead of bound. This is the
//! "most recent intent wins, the unwanted stream is released" contract.

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

/// Preview size bounds: 0 = hidden, 2 = large.
pub const MIN_PREVIEW_SIZE: u8 = 0;
pub const MAX_PREVIEW_SIZE: u8 = 2;

// =============================================================================
// CAPTURE DEVICE SEAM
// =============================================================================

/// Errors produced by capture acquisition.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The user or platform refused the permission request.
    #[error("capture permission denied")]
    Denied,
    /// No capture hardware is present (headless environments).
    #[error("no capture device available")]
    Unavailable,
}

/// A granted, revocable media handle. Dropping without `stop` would leak
/// platform resources, so the controller always stops explicitly.
pub trait CaptureTrack: Send + Sync {
    /// Stop all underlying hardware tracks. Idempotent.
    fn stop(&self);
}

/// Platform capture API. The async grant is the suspension point; mocks
/// in tests delay it to exercise the stale-grant race.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Request a video capture handle.
    ///
    /// # Errors
    ///
    /// [`CaptureError::Denied`] on permission refusal,
    /// [`CaptureError::Unavailable`] when no device exists.
    async fn acquire(&self) -> Result<Box<dyn CaptureTrack>, CaptureError>;
}

/// Device for headless environments: every request is unavailable.
pub struct NullDevice;

#[async_trait]
impl CaptureDevice for NullDevice {
    async fn acquire(&self) -> Result<Box<dyn CaptureTrack>, CaptureError> {
        Err(CaptureError::Unavailable)
    }
}

// =============================================================================
// CONTROLLER STATE
// =============================================================================

/// What the platform is currently providing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedState {
    Off,
    Requesting,
    Live,
    Denied,
}

/// Camera/presence state for one room session. Owned by the session
/// behind its lock; the session spawns the acquisition task.
pub struct CameraController {
    intent: bool,
    feed: FeedState,
    track: Option<Box<dyn CaptureTrack>>,
    preview_size: u8,
    mic_on: bool,
    screen_sharing: bool,
    request_gen: u64,
}

impl CameraController {
    #[must_use]
    pub fn new(mic_on: bool) -> Self {
        Self {
            intent: false,
            feed: FeedState::Off,
            track: None,
            preview_size: 1,
            mic_on,
            screen_sharing: false,
            request_gen: 0,
        }
    }

    /// Record the user's wish for a live feed and open a new acquisition
    /// generation. The returned generation must accompany the eventual
    /// grant or denial.
    pub fn begin_request(&mut self) -> u64 {
        self.intent = true;
        self.feed = FeedState::Requesting;
        self.request_gen += 1;
        self.request_gen
    }

    /// Bind a granted handle, or release it immediately when the request
    /// generation is stale or the feed is no longer wanted.
    ///
    /// Returns `true` when the handle was bound.
    pub fn grant(&mut self, generation: u64, track: Box<dyn CaptureTrack>) -> bool {
        if generation != self.request_gen || !self.intent {
            track.stop();
            return false;
        }
        // Replace any previous handle; stop it first.
        if let Some(old) = self.track.take() {
            old.stop();
        }
        self.track = Some(track);
        self.feed = FeedState::Live;
        true
    }

    /// Record a denial for the given request generation. Intent stays true:
    /// the room continues without a live feed.
    pub fn deny(&mut self, generation: u64, error: &CaptureError) {
        if generation != self.request_gen {
            return;
        }
        warn!(error = %error, "camera: capture not granted");
        self.feed = FeedState::Denied;
    }

    /// Drop the wish for a live feed, releasing any held handle before
    /// returning and invalidating in-flight requests.
    pub fn deactivate(&mut self) {
        self.intent = false;
        self.request_gen += 1;
        if let Some(track) = self.track.take() {
            track.stop();
        }
        self.feed = FeedState::Off;
    }

    /// Adjust the preview size by `delta`, clamped to `[0, 2]`. Pure with
    /// respect to the capture handle.
    pub fn resize_preview(&mut self, delta: i32) {
        let next = i32::from(self.preview_size) + delta;
        self.preview_size = next.clamp(i32::from(MIN_PREVIEW_SIZE), i32::from(MAX_PREVIEW_SIZE)) as u8;
    }

    pub fn toggle_mic(&mut self) -> bool {
        self.mic_on = !self.mic_on;
        self.mic_on
    }

    pub fn toggle_screen_share(&mut self) -> bool {
        self.screen_sharing = !self.screen_sharing;
        self.screen_sharing
    }

    #[must_use]
    pub fn intent(&self) -> bool {
        self.intent
    }

    /// Whether a capture handle is currently held.
    #[must_use]
    pub fn holds_track(&self) -> bool {
        self.track.is_some()
    }

    #[must_use]
    pub fn view(&self) -> CameraView {
        CameraView {
            intent: self.intent,
            feed: self.feed,
            preview_size: self.preview_size,
            mic_on: self.mic_on,
            screen_sharing: self.screen_sharing,
        }
    }
}

impl std::fmt::Debug for CameraController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraController")
            .field("intent", &self.intent)
            .field("feed", &self.feed)
            .field("holds_track", &self.track.is_some())
            .field("preview_size", &self.preview_size)
            .field("request_gen", &self.request_gen)
            .finish()
    }
}

/// Presentation-facing camera state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CameraView {
    pub intent: bool,
    pub feed: FeedState,
    pub preview_size: u8,
    pub mic_on: bool,
    pub screen_sharing: bool,
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "camera_test.rs"]
mod tests;
