use super::*;
use crate::test_utils::{running_state, test_state, TestTerminal};
use bslaunch_app::state::DirectoryPrompt;

#[test]
fn test_stopped_panel() {
    let state = test_state();
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("Browsersync Launcher"));
    assert!(term.buffer_contains("Launch Browsersync"));
    assert!(term.buffer_contains("Not Available"));
    assert!(term.buffer_contains("No server output yet"));
}

#[test]
fn test_running_panel() {
    let state = running_state(|_| {});
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("Stop Browsersync"));
    assert!(term.buffer_contains("http://localhost:8000"));
    assert!(term.buffer_contains("Browsersync running at"));
    assert!(term.buffer_contains("pid 4242"));
}

#[test]
fn test_prompt_overlay() {
    let mut state = test_state();
    state.prompt = Some(DirectoryPrompt::new("/srv/www"));
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("Select base directory"));
    assert!(term.buffer_contains("/srv/www"));
}

#[test]
fn test_license_overlay_on_top() {
    let mut state = test_state();
    state.license.request();
    state.license.loaded("Permission is hereby granted".into());
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("Permission is hereby granted"));
}

#[test]
fn test_drag_overlay() {
    let mut state = test_state();
    state.launcher.drag_enter();
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("Drop a directory"));
}

#[test]
fn test_small_terminal_does_not_panic() {
    let state = running_state(|_| {});
    let mut term = TestTerminal::with_size(20, 6);
    term.draw_with(|frame| view(frame, &state));
}
