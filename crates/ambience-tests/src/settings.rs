//! Integration tests for the persisted theme preference.

use crate::fixtures::loaded_session;
use ambience_control::{
    Action, Controller, CountdownTimer, JsonFileStore, KeyValueStore, PresetEngine, ThemeMode,
    ThemePreference,
};

fn controller_at(path: &std::path::Path) -> Controller {
    Controller::new(
        loaded_session(),
        PresetEngine::default(),
        CountdownTimer::new(),
        ThemePreference::load(Box::new(JsonFileStore::open(path))),
    )
}

#[test]
fn theme_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ambience").join("settings.json");

    let mut first = controller_at(&path);
    assert_eq!(first.theme().mode(), ThemeMode::Light);
    first.dispatch(Action::ToggleTheme);
    first.dispatch(Action::PlayAll);
    drop(first);

    let second = controller_at(&path);
    assert_eq!(second.theme().mode(), ThemeMode::Dark);
    // Only the theme is persisted.
    assert!(!second.session().is_any_playing());
}

#[test]
fn settings_file_is_flat_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut controller = controller_at(&path);
    controller.dispatch(Action::ToggleTheme);
    controller.dispatch(Action::ToggleTheme);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"darkMode\": \"false\""), "got {}", content);
    assert_eq!(
        JsonFileStore::open(&path).get_string("darkMode").as_deref(),
        Some("false")
    );
}
