//! Static catalog: subjects, scenes, and seed room listings.
//!
//! DESIGN
//! ======
//! All data here is fixed product content: the scene gallery, the subject
//! taxonomy, and the dashboard's seed listings. Nothing is persisted; the
//! create-room flow appends to an in-memory `Vec` owned by the app
//! controller. Listing ids for created rooms are time-derived with a short
//! random suffix so two rooms created within the same millisecond stay
//! distinct.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default scene applied when joining a room.
pub const DEFAULT_SCENE_ID: &str = "lofi-night";

/// Capacity slider bounds for the create-room form.
pub const MIN_ROOM_CAPACITY: u32 = 2;
pub const MAX_ROOM_CAPACITY: u32 = 20;

// =============================================================================
// SUBJECT
// =============================================================================

/// Study subject taxonomy. Display strings match the product copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "Computer Science")]
    ComputerScience,
    #[serde(rename = "Mathematics")]
    Mathematics,
    #[serde(rename = "Literature")]
    Literature,
    #[serde(rename = "Physics")]
    Physics,
    #[serde(rename = "Biology")]
    Biology,
    #[serde(rename = "Economics")]
    Economics,
    #[serde(rename = "General Focus")]
    GeneralFocus,
    #[serde(rename = "Art & Design")]
    ArtDesign,
}

impl Subject {
    /// All subjects, in dashboard display order.
    pub const ALL: [Subject; 8] = [
        Subject::ComputerScience,
        Subject::Mathematics,
        Subject::Literature,
        Subject::Physics,
        Subject::Biology,
        Subject::Economics,
        Subject::GeneralFocus,
        Subject::ArtDesign,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Subject::ComputerScience => "Computer Science",
            Subject::Mathematics => "Mathematics",
            Subject::Literature => "Literature",
            Subject::Physics => "Physics",
            Subject::Biology => "Biology",
            Subject::Economics => "Economics",
            Subject::GeneralFocus => "General Focus",
            Subject::ArtDesign => "Art & Design",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// SCENES
// =============================================================================

/// A selectable virtual background plus its display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub id: &'static str,
    pub name: &'static str,
    pub image_url: &'static str,
    /// Icon identifier consumed by the view layer.
    pub icon: &'static str,
    /// Accent color class for the icon.
    pub accent: &'static str,
}

/// The fixed scene gallery, in display order.
#[must_use]
pub fn scenes() -> &'static [Scene] {
    static SCENES: [Scene; 6] = [
        Scene {
            id: "space-station",
            name: "Orbital View",
            image_url: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?auto=format&fit=crop&w=1920&q=80",
            icon: "fa-user-astronaut",
            accent: "text-purple-300",
        },
        Scene {
            id: "beach-relax",
            name: "Sunset Beach",
            image_url: "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?auto=format&fit=crop&w=1920&q=80",
            icon: "fa-umbrella-beach",
            accent: "text-orange-300",
        },
        Scene {
            id: "rainy-window",
            name: "Rainy Cafe",
            image_url: "https://images.unsplash.com/photo-1515694346937-94d85e41e6f0?auto=format&fit=crop&w=1920&q=80",
            icon: "fa-cloud-rain",
            accent: "text-blue-300",
        },
        Scene {
            id: "nature-forest",
            name: "Forest Zen",
            image_url: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?auto=format&fit=crop&w=1920&q=80",
            icon: "fa-tree",
            accent: "text-green-300",
        },
        Scene {
            id: "minimal-library",
            name: "Modern Library",
            image_url: "https://images.unsplash.com/photo-1568667256549-094345857637?auto=format&fit=crop&w=1920&q=80",
            icon: "fa-book-open",
            accent: "text-yellow-200",
        },
        Scene {
            id: "lofi-night",
            name: "Lofi Night",
            image_url: "https://images.unsplash.com/photo-1555680202-c86f0e12f086?auto=format&fit=crop&w=1920&q=80",
            icon: "fa-moon",
            accent: "text-indigo-300",
        },
    ];
    &SCENES
}

/// Look up a scene by id, falling back to the first catalog entry.
#[must_use]
pub fn scene_or_default(id: &str) -> Scene {
    scenes()
        .iter()
        .find(|s| s.id == id)
        .unwrap_or(&scenes()[0])
        .clone()
}

// =============================================================================
// ROOM LISTINGS
// =============================================================================

/// A study room as shown on the dashboard.
///
/// Invariant: `participants <= max_participants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyRoomListing {
    pub id: String,
    pub host_name: String,
    pub host_avatar: String,
    pub topic: String,
    pub subject: Subject,
    pub grade_level: String,
    pub participants: u32,
    pub max_participants: u32,
    pub tags: Vec<String>,
}

/// Dashboard subject filter: everything, or one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubjectFilter {
    #[default]
    All,
    Only(Subject),
}

/// Filter listings by subject. `All` is the identity; `Only(s)` keeps
/// listings whose subject equals `s`. Pure and total.
#[must_use]
pub fn filter_listings(listings: &[StudyRoomListing], filter: SubjectFilter) -> Vec<StudyRoomListing> {
    match filter {
        SubjectFilter::All => listings.to_vec(),
        SubjectFilter::Only(subject) => listings
            .iter()
            .filter(|l| l.subject == subject)
            .cloned()
            .collect(),
    }
}

// =============================================================================
// CREATE ROOM
// =============================================================================

/// Form state for the create-room flow. Capacity is clamped, never rejected.
#[derive(Debug, Clone)]
pub struct RoomDraft {
    pub topic: String,
    pub subject: Subject,
    pub max_participants: u32,
}

impl Default for RoomDraft {
    fn default() -> Self {
        Self { topic: String::new(), subject: Subject::GeneralFocus, max_participants: 6 }
    }
}

impl RoomDraft {
    /// Materialize the draft into a listing hosted by `host_name`.
    ///
    /// Blank topics fall back to "Study Session"; the creator counts as the
    /// first participant.
    #[must_use]
    pub fn into_listing(self, host_name: &str) -> StudyRoomListing {
        let topic = if self.topic.trim().is_empty() { "Study Session".to_string() } else { self.topic };
        let initials: String = host_name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect();
        StudyRoomListing {
            id: new_listing_id(),
            host_name: host_name.to_string(),
            host_avatar: initials.to_uppercase(),
            topic,
            subject: self.subject,
            grade_level: "Junior".to_string(),
            participants: 1,
            max_participants: self.max_participants.clamp(MIN_ROOM_CAPACITY, MAX_ROOM_CAPACITY),
            tags: vec!["New".to_string()],
        }
    }
}

/// Time-derived listing id with a random suffix to break same-millisecond ties.
fn new_listing_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    let suffix: u16 = rand::rng().random();
    format!("{millis}-{suffix:04x}")
}

/// The five dashboard seed listings.
#[must_use]
pub fn seed_rooms() -> Vec<StudyRoomListing> {
    let room = |id: &str, host: &str, avatar: &str, topic: &str, subject, grade: &str, n, max, tags: &[&str]| {
        StudyRoomListing {
            id: id.to_string(),
            host_name: host.to_string(),
            host_avatar: avatar.to_string(),
            topic: topic.to_string(),
            subject,
            grade_level: grade.to_string(),
            participants: n,
            max_participants: max,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    };
    vec![
        room("101", "David Kim", "DK", "Calculus II Finals Prep", Subject::Mathematics, "Sophomore", 12, 15, &[
            "Quiet",
            "Camera On",
        ]),
        room("102", "Sarah Jenkins", "SJ", "Creative Writing Sprint", Subject::Literature, "Junior", 4, 8, &[
            "Pomodoro",
            "Lofi Music",
        ]),
        room("103", "Tsinghua CS Group", "TS", "LeetCode Grinding", Subject::ComputerScience, "Senior", 28, 30, &[
            "Hardcore",
            "Interview Prep",
        ]),
        room("104", "Emily & Co", "EC", "Intro to Macroeconomics", Subject::Economics, "Freshman", 1, 5, &[
            "Chill",
            "Tutoring",
        ]),
        room("105", "Design Collective", "DC", "Portfolio Review", Subject::ArtDesign, "Mixed", 6, 10, &[
            "Screen Share",
            "Critique",
        ]),
    ]
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
