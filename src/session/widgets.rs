//! Room widget state: visibility map plus widget-local data.
//!
//! DESIGN
//! ======
//! The original product scattered one boolean per floating tool; here
//! visibility is a single map keyed by [`WidgetKind`] so tests can
//! enumerate every widget instead of 2^N flag combinations. There is
//! deliberately no mutual-exclusion rule between widgets; several may be
//! visible at once; exclusive-overlay styling is a view concern.
//!
//! Widget-local data stays next to its widget: the music player's playing
//! flag, the search panel's query, the settings toggles, and the static
//! file listing.

use serde::Serialize;

// =============================================================================
// VISIBILITY
// =============================================================================

/// Every floating tool a room session can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WidgetKind {
    Timer,
    Music,
    Settings,
    Search,
    Files,
    BackgroundGallery,
}

impl WidgetKind {
    /// All widgets, for exhaustive enumeration in tests and snapshots.
    pub const ALL: [WidgetKind; 6] = [
        WidgetKind::Timer,
        WidgetKind::Music,
        WidgetKind::Settings,
        WidgetKind::Search,
        WidgetKind::Files,
        WidgetKind::BackgroundGallery,
    ];

    fn index(self) -> usize {
        match self {
            WidgetKind::Timer => 0,
            WidgetKind::Music => 1,
            WidgetKind::Settings => 2,
            WidgetKind::Search => 3,
            WidgetKind::Files => 4,
            WidgetKind::BackgroundGallery => 5,
        }
    }
}

/// Visibility state for all widgets. Everything starts hidden.
#[derive(Debug, Default)]
pub struct WidgetPanels {
    visible: [bool; 6],
}

impl WidgetPanels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self, kind: WidgetKind) -> bool {
        self.visible[kind.index()]
    }

    /// Flip visibility and return the new value.
    pub fn toggle(&mut self, kind: WidgetKind) -> bool {
        let slot = &mut self.visible[kind.index()];
        *slot = !*slot;
        *slot
    }

    /// Idempotent show.
    pub fn open(&mut self, kind: WidgetKind) {
        self.visible[kind.index()] = true;
    }

    /// Idempotent hide.
    pub fn close(&mut self, kind: WidgetKind) {
        self.visible[kind.index()] = false;
    }

    /// `(kind, visible)` for every widget, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (WidgetKind, bool)> + '_ {
        WidgetKind::ALL.into_iter().map(|k| (k, self.is_open(k)))
    }
}

// =============================================================================
// MUSIC PLAYER
// =============================================================================

/// Lofi radio widget: a play/pause flag over static track metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MusicPlayer {
    pub playing: bool,
    pub track_title: &'static str,
    pub track_artist: &'static str,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self { playing: false, track_title: "Chill Hop Beats", track_artist: "Lofi Girl" }
    }
}

impl MusicPlayer {
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }
}

// =============================================================================
// SEARCH
// =============================================================================

/// Resource search panel.
///
/// The "searching" indicator is decorative: any non-empty query shows a
/// pending state with no backing index. Preserved as visual-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchPanel {
    pub query: String,
}

impl SearchPanel {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Room settings toggles. Volume is clamped, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsPanel {
    pub notifications: bool,
    pub background_blur: bool,
    /// Ambient sound volume, 0..=100.
    pub ambient_volume: u8,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self { notifications: true, background_blur: false, ambient_volume: 50 }
    }
}

impl SettingsPanel {
    pub fn set_ambient_volume(&mut self, volume: i32) {
        self.ambient_volume = volume.clamp(0, 100) as u8;
    }
}

// =============================================================================
// FILES
// =============================================================================

/// A read-only entry in the room resources widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomResource {
    pub name: &'static str,
    pub kind: &'static str,
}

/// Static room resource listing. No real upload in scope.
#[must_use]
pub fn room_resources() -> &'static [RoomResource] {
    static RESOURCES: [RoomResource; 3] = [
        RoomResource { name: "Calculus_Notes_Ch1.pdf", kind: "pdf" },
        RoomResource { name: "Calculus_Notes_Ch2.pdf", kind: "pdf" },
        RoomResource { name: "Calculus_Notes_Ch3.pdf", kind: "pdf" },
    ];
    &RESOURCES
}

#[cfg(test)]
#[path = "widgets_test.rs"]
mod tests;
