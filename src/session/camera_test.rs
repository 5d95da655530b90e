use super::test_helpers::fake_track;
use super::*;
use std::sync::atomic::Ordering;

#[test]
fn new_controller_is_off() {
    let camera = CameraController::new(false);
    let view = camera.view();
    assert!(!view.intent);
    assert_eq!(view.feed, FeedState::Off);
    assert_eq!(view.preview_size, 1);
    assert!(!camera.holds_track());
}

#[test]
fn begin_request_sets_intent_and_requesting() {
    let mut camera = CameraController::new(false);
    let gen_a = camera.begin_request();
    let gen_b = camera.begin_request();
    assert!(gen_b > gen_a, "each request opens a fresh generation");
    assert!(camera.intent());
    assert_eq!(camera.view().feed, FeedState::Requesting);
}

#[test]
fn grant_for_current_generation_binds_track() {
    let mut camera = CameraController::new(false);
    let generation = camera.begin_request();
    let (track, stopped) = fake_track();

    assert!(camera.grant(generation, track));
    assert_eq!(camera.view().feed, FeedState::Live);
    assert!(camera.holds_track());
    assert!(!stopped.load(Ordering::SeqCst));
}

#[test]
fn stale_grant_is_stopped_not_bound() {
    let mut camera = CameraController::new(false);
    let stale = camera.begin_request();
    let current = camera.begin_request();
    let (track, stopped) = fake_track();

    assert!(!camera.grant(stale, track));
    assert!(stopped.load(Ordering::SeqCst), "unwanted stream must be released");
    assert!(!camera.holds_track());
    assert_eq!(camera.view().feed, FeedState::Requesting);

    let (track, _) = fake_track();
    assert!(camera.grant(current, track));
}

#[test]
fn grant_after_deactivate_is_stopped() {
    let mut camera = CameraController::new(false);
    let generation = camera.begin_request();
    camera.deactivate();

    let (track, stopped) = fake_track();
    assert!(!camera.grant(generation, track));
    assert!(stopped.load(Ordering::SeqCst));
    assert_eq!(camera.view().feed, FeedState::Off);
    assert!(!camera.intent());
}

#[test]
fn rebind_stops_previous_track() {
    let mut camera = CameraController::new(false);
    let first_gen = camera.begin_request();
    let (first, first_stopped) = fake_track();
    camera.grant(first_gen, first);

    let second_gen = camera.begin_request();
    let (second, second_stopped) = fake_track();
    assert!(camera.grant(second_gen, second));

    assert!(first_stopped.load(Ordering::SeqCst));
    assert!(!second_stopped.load(Ordering::SeqCst));
}

#[test]
fn deactivate_releases_held_track() {
    let mut camera = CameraController::new(false);
    let generation = camera.begin_request();
    let (track, stopped) = fake_track();
    camera.grant(generation, track);

    camera.deactivate();
    assert!(stopped.load(Ordering::SeqCst));
    assert!(!camera.holds_track());
    assert_eq!(camera.view().feed, FeedState::Off);
}

#[test]
fn denial_keeps_intent() {
    let mut camera = CameraController::new(false);
    let generation = camera.begin_request();
    camera.deny(generation, &CaptureError::Denied);

    assert!(camera.intent(), "denial must not erase what the user asked for");
    assert_eq!(camera.view().feed, FeedState::Denied);
}

#[test]
fn stale_denial_is_ignored() {
    let mut camera = CameraController::new(false);
    let stale = camera.begin_request();
    let current = camera.begin_request();
    camera.deny(stale, &CaptureError::Unavailable);
    assert_eq!(camera.view().feed, FeedState::Requesting);

    let (track, _) = fake_track();
    assert!(camera.grant(current, track));
}

#[test]
fn preview_resize_clamps_and_leaves_track_alone() {
    let mut camera = CameraController::new(false);
    let generation = camera.begin_request();
    let (track, stopped) = fake_track();
    camera.grant(generation, track);

    camera.resize_preview(5);
    assert_eq!(camera.view().preview_size, MAX_PREVIEW_SIZE);
    camera.resize_preview(-10);
    assert_eq!(camera.view().preview_size, MIN_PREVIEW_SIZE);
    camera.resize_preview(1);
    assert_eq!(camera.view().preview_size, 1);

    assert!(!stopped.load(Ordering::SeqCst));
    assert_eq!(camera.view().feed, FeedState::Live);
}

#[test]
fn mic_and_screen_share_toggle() {
    let mut camera = CameraController::new(true);
    assert!(camera.view().mic_on);
    assert!(!camera.toggle_mic());
    assert!(camera.toggle_screen_share());
    assert!(!camera.toggle_screen_share());
}
