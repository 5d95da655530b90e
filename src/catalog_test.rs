use super::*;

// =========================================================================
// Scenes
// =========================================================================

#[test]
fn scene_catalog_has_six_unique_entries() {
    let all = scenes();
    assert_eq!(all.len(), 6);
    let mut ids: Vec<&str> = all.iter().map(|s| s.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 6);
}

#[test]
fn default_scene_is_in_catalog() {
    assert!(scenes().iter().any(|s| s.id == DEFAULT_SCENE_ID));
}

#[test]
fn scene_lookup_by_id() {
    let scene = scene_or_default("rainy-window");
    assert_eq!(scene.name, "Rainy Cafe");
}

#[test]
fn scene_lookup_unknown_falls_back_to_first() {
    let scene = scene_or_default("no-such-scene");
    assert_eq!(scene.id, scenes()[0].id);
}

// =========================================================================
// Filter
// =========================================================================

#[test]
fn filter_all_is_identity() {
    let rooms = seed_rooms();
    assert_eq!(filter_listings(&rooms, SubjectFilter::All), rooms);
}

#[test]
fn filter_by_subject_keeps_matching_only() {
    let rooms = seed_rooms();
    let filtered = filter_listings(&rooms, SubjectFilter::Only(Subject::Mathematics));
    assert_eq!(filtered.len(), 1);
    assert!(filtered.iter().all(|r| r.subject == Subject::Mathematics));
}

#[test]
fn filter_all_after_filter_is_round_trip_identity() {
    let rooms = seed_rooms();
    let once = filter_listings(&rooms, SubjectFilter::Only(Subject::Literature));
    let twice = filter_listings(&once, SubjectFilter::All);
    assert_eq!(twice, once);
}

#[test]
fn filter_with_no_matches_is_empty() {
    let rooms = seed_rooms();
    let filtered = filter_listings(&rooms, SubjectFilter::Only(Subject::Biology));
    assert!(filtered.is_empty());
}

// =========================================================================
// Seed rooms
// =========================================================================

#[test]
fn seed_rooms_hold_capacity_invariant() {
    for room in seed_rooms() {
        assert!(room.participants <= room.max_participants, "room {} over capacity", room.id);
    }
}

#[test]
fn seed_rooms_are_five() {
    assert_eq!(seed_rooms().len(), 5);
}

// =========================================================================
// Create room
// =========================================================================

#[test]
fn draft_blank_topic_falls_back() {
    let listing = RoomDraft { topic: "   ".into(), ..RoomDraft::default() }.into_listing("Dolores McClure Sr.");
    assert_eq!(listing.topic, "Study Session");
}

#[test]
fn draft_capacity_is_clamped() {
    let over = RoomDraft { max_participants: 99, ..RoomDraft::default() }.into_listing("Host");
    assert_eq!(over.max_participants, MAX_ROOM_CAPACITY);

    let under = RoomDraft { max_participants: 0, ..RoomDraft::default() }.into_listing("Host");
    assert_eq!(under.max_participants, MIN_ROOM_CAPACITY);
}

#[test]
fn created_listing_starts_with_one_participant() {
    let listing = RoomDraft::default().into_listing("Dolores McClure Sr.");
    assert_eq!(listing.participants, 1);
    assert!(listing.participants <= listing.max_participants);
    assert_eq!(listing.tags, vec!["New".to_string()]);
    assert_eq!(listing.host_avatar, "DM");
}

#[test]
fn listing_id_is_time_derived_token() {
    let listing = RoomDraft::default().into_listing("Host");
    let (millis, suffix) = listing.id.split_once('-').expect("id has suffix");
    assert!(millis.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(suffix.len(), 4);
}

#[test]
fn subject_labels_round_trip_serde() {
    for subject in Subject::ALL {
        let json = serde_json::to_string(&subject).unwrap();
        assert_eq!(json, format!("\"{subject}\""));
        let back: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, subject);
    }
}
