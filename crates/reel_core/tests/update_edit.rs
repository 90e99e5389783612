use reel_core::{update, AppState, Msg, RenderSettings};

#[test]
fn script_change_marks_dirty_without_effects() {
    let (mut next, effects) = update(AppState::new(), Msg::ScriptChanged("Hello.".to_string()));

    assert!(effects.is_empty());
    assert_eq!(next.script(), "Hello.");
    assert_eq!(next.view().script_chars, 6);
    assert!(next.consume_dirty());
    assert!(!next.consume_dirty());
}

#[test]
fn settings_change_is_stored_verbatim() {
    let settings = RenderSettings {
        width: 1920,
        height: 1080,
        ..RenderSettings::default()
    };
    let (mut next, effects) = update(AppState::new(), Msg::SettingsChanged(settings.clone()));

    assert!(effects.is_empty());
    assert_eq!(next.settings(), &settings);
    assert!(next.consume_dirty());
}

#[test]
fn fresh_state_is_clean_and_idle() {
    let mut state = AppState::new();
    let view = state.view();

    assert!(!state.consume_dirty());
    assert!(!view.is_generating);
    assert!(!view.is_generating_audio);
    assert_eq!(view.time_display, "0:00");
}
