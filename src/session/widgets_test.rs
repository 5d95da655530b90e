use super::*;

// =========================================================================
// Visibility
// =========================================================================

#[test]
fn every_widget_starts_hidden() {
    let panels = WidgetPanels::new();
    for kind in WidgetKind::ALL {
        assert!(!panels.is_open(kind), "{kind:?} should start hidden");
    }
}

#[test]
fn toggle_flips_only_the_named_widget() {
    let mut panels = WidgetPanels::new();
    assert!(panels.toggle(WidgetKind::Music));
    for (kind, visible) in panels.iter() {
        assert_eq!(visible, kind == WidgetKind::Music);
    }
    assert!(!panels.toggle(WidgetKind::Music));
    assert!(!panels.is_open(WidgetKind::Music));
}

#[test]
fn open_and_close_are_idempotent() {
    let mut panels = WidgetPanels::new();
    panels.open(WidgetKind::Files);
    panels.open(WidgetKind::Files);
    assert!(panels.is_open(WidgetKind::Files));

    panels.close(WidgetKind::Files);
    panels.close(WidgetKind::Files);
    assert!(!panels.is_open(WidgetKind::Files));
}

#[test]
fn widgets_are_independent() {
    let mut panels = WidgetPanels::new();
    panels.open(WidgetKind::Timer);
    panels.open(WidgetKind::BackgroundGallery);
    assert!(panels.is_open(WidgetKind::Timer));
    assert!(panels.is_open(WidgetKind::BackgroundGallery));
    assert!(!panels.is_open(WidgetKind::Settings));
}

// =========================================================================
// Widget-local data
// =========================================================================

#[test]
fn music_toggle_round_trips() {
    let mut music = MusicPlayer::default();
    assert!(!music.playing);
    assert!(music.toggle());
    assert!(!music.toggle());
    assert_eq!(music.track_title, "Chill Hop Beats");
}

#[test]
fn search_is_searching_ignores_whitespace() {
    let mut search = SearchPanel::default();
    assert!(!search.is_searching());
    search.set_query("   ");
    assert!(!search.is_searching());
    search.set_query("calculus");
    assert!(search.is_searching());
}

#[test]
fn settings_volume_is_clamped() {
    let mut settings = SettingsPanel::default();
    assert_eq!(settings.ambient_volume, 50);
    settings.set_ambient_volume(-5);
    assert_eq!(settings.ambient_volume, 0);
    settings.set_ambient_volume(150);
    assert_eq!(settings.ambient_volume, 100);
    settings.set_ambient_volume(73);
    assert_eq!(settings.ambient_volume, 73);
}

#[test]
fn room_resources_are_static_pdfs() {
    let resources = room_resources();
    assert_eq!(resources.len(), 3);
    assert!(resources.iter().all(|r| r.kind == "pdf"));
}
