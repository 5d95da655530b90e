//! App controller: top-level navigation between dashboard and room.
//!
//! DESIGN
//! ======
//! Two states: browsing the dashboard, or inside exactly one room session.
//! Joining builds an immutable [`RoomSessionConfig`] (default scene, mic
//! and video off) and hands it to a fresh [`RoomSession`]; leaving tears
//! that session down, the single boundary where every resource acquired
//! inside the room (capture handle, tick source, outstanding tutor
//! request) is released. No room state survives across sessions.

use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::{self, RoomDraft, StudyRoomListing, SubjectFilter};
use crate::profile::{ProfileCommand, ProfileEditor, ProfileSnapshot, seed_profile};
use crate::session::camera::CaptureDevice;
use crate::session::{RoomSession, RoomSessionConfig};
use crate::tutor::TutorChat;

/// Which top-level surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Browsing,
    InRoom,
}

// =============================================================================
// APP
// =============================================================================

/// The whole client: room catalog, profile editor, and at most one live
/// room session.
pub struct StudyApp {
    rooms: Vec<StudyRoomListing>,
    filter: SubjectFilter,
    session: Option<RoomSession>,
    profile: ProfileEditor,
    profile_open: bool,
    tutor: Option<Arc<dyn TutorChat>>,
    device: Arc<dyn CaptureDevice>,
}

impl StudyApp {
    /// Build the app with seeded catalog and profile data. `tutor` is
    /// `None` when no credential is configured; room sessions still work,
    /// tutor questions get the apology reply.
    #[must_use]
    pub fn new(tutor: Option<Arc<dyn TutorChat>>, device: Arc<dyn CaptureDevice>) -> Self {
        Self {
            rooms: catalog::seed_rooms(),
            filter: SubjectFilter::All,
            session: None,
            profile: ProfileEditor::new(seed_profile()),
            profile_open: false,
            tutor,
            device,
        }
    }

    #[must_use]
    pub fn view(&self) -> AppView {
        if self.session.is_some() { AppView::InRoom } else { AppView::Browsing }
    }

    // -------------------------------------------------------------------------
    // Dashboard
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn rooms(&self) -> &[StudyRoomListing] {
        &self.rooms
    }

    pub fn set_filter(&mut self, filter: SubjectFilter) {
        self.filter = filter;
    }

    #[must_use]
    pub fn filter(&self) -> SubjectFilter {
        self.filter
    }

    /// Listings visible under the current subject filter.
    #[must_use]
    pub fn filtered_rooms(&self) -> Vec<StudyRoomListing> {
        catalog::filter_listings(&self.rooms, self.filter)
    }

    /// Create a room from the draft, hosted by the local user, and add it
    /// to the catalog. Returns the new listing's id.
    pub fn create_room(&mut self, draft: RoomDraft) -> String {
        let listing = draft.into_listing(&self.profile.current().profile.name);
        let id = listing.id.clone();
        info!(room_id = %id, topic = %listing.topic, "room created");
        self.rooms.push(listing);
        id
    }

    // -------------------------------------------------------------------------
    // Join / leave
    // -------------------------------------------------------------------------

    /// Join a room by listing id, entering the in-room view. Any previous
    /// session is torn down first. Returns `None` for unknown ids.
    pub async fn join(&mut self, room_id: &str) -> Option<&RoomSession> {
        let Some(listing) = self.rooms.iter().find(|r| r.id == room_id).cloned() else {
            warn!(room_id, "join: unknown room");
            return None;
        };

        if let Some(previous) = self.session.take() {
            previous.shutdown().await;
        }

        let config = RoomSessionConfig {
            listing,
            scene_id: catalog::DEFAULT_SCENE_ID.to_string(),
            mic_on: false,
            video_on: false,
        };
        let session = RoomSession::new(config, self.tutor.clone(), Arc::clone(&self.device));
        info!(session_id = %session.id(), room_id, "joined room");
        self.session = Some(session);
        self.session.as_ref()
    }

    /// The live session, when inside a room.
    #[must_use]
    pub fn session(&self) -> Option<&RoomSession> {
        self.session.as_ref()
    }

    /// Leave the current room, discarding all room-session state. No-op
    /// when already browsing.
    pub async fn leave(&mut self) {
        if let Some(session) = self.session.take() {
            session.shutdown().await;
            info!(session_id = %session.id(), "left room");
        }
    }

    // -------------------------------------------------------------------------
    // Profile
    // -------------------------------------------------------------------------

    pub fn open_profile(&mut self) {
        self.profile_open = true;
    }

    pub fn close_profile(&mut self) {
        self.profile_open = false;
    }

    #[must_use]
    pub fn is_profile_open(&self) -> bool {
        self.profile_open
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileSnapshot {
        self.profile.current()
    }

    /// Apply a profile edit command; see [`ProfileEditor::apply`].
    pub fn edit_profile(&mut self, command: ProfileCommand) -> &ProfileSnapshot {
        self.profile.apply(command)
    }

    /// Undo the most recent profile edit.
    pub fn undo_profile_edit(&mut self) -> bool {
        self.profile.undo()
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
