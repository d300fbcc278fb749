//! Tests for the update function and key handling

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bslaunch_core::{LauncherPhase, OutputStream, ServerEvent, ServerInfo};
use bslaunch_server::{ServerControl, ServerHandle};

use super::{update, UpdateAction};
use crate::builder::Defaults;
use crate::config::{ConfigStore, MemoryConfigStore, Settings};
use crate::directory::DroppedEntry;
use crate::engine_event::EngineEvent;
use crate::form::FieldId;
use crate::input_key::InputKey;
use crate::launcher::{LauncherInstance, UiBindings};
use crate::message::Message;
use crate::state::{AppState, Focus, StatusLevel};

struct FakeControl(AtomicBool);

impl ServerControl for FakeControl {
    fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn test_state_with_store(store: MemoryConfigStore) -> AppState {
    let launcher = LauncherInstance::new(
        "main",
        Box::new(store),
        Defaults::with("/home/u", "192.168.1.20"),
        &UiBindings::all(),
    )
    .unwrap();
    AppState::new(launcher, Settings::default())
}

fn test_state() -> AppState {
    test_state_with_store(MemoryConfigStore::new())
}

/// Run `msg` and any follow-up messages, returning the actions produced
fn run(state: &mut AppState, msg: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut next = Some(msg);
    while let Some(m) = next {
        let result = update(state, m);
        actions.extend(result.action);
        next = result.message;
    }
    actions
}

/// Click launch and complete the start; returns the fake server control
fn start_server(state: &mut AppState) -> Arc<FakeControl> {
    let actions = run(state, Message::LaunchClicked);
    let Some(UpdateAction::StartServer { server_id, config }) = actions.into_iter().next() else {
        panic!("expected StartServer");
    };
    let control = Arc::new(FakeControl(AtomicBool::new(true)));
    let handle = ServerHandle::new(Some(1), ServerInfo::default(), control.clone());
    run(
        state,
        Message::ServerStarted {
            server_id,
            config,
            handle,
        },
    );
    control
}

#[test]
fn test_quit_sets_phase() {
    let mut state = test_state();
    run(&mut state, Message::Quit);
    assert!(state.should_quit());
}

#[test]
fn test_ctrl_c_quits_from_overlays() {
    let mut state = test_state();
    run(&mut state, Message::DirectoryDialogRequested);
    assert!(state.prompt.is_some());
    run(&mut state, Message::Key(InputKey::CharCtrl('c')));
    assert!(state.should_quit());
}

#[test]
fn test_launch_emits_start_action() {
    let mut state = test_state();
    state.launcher.form_mut().port = "9000".into();

    let actions = run(&mut state, Message::Key(InputKey::CharCtrl('l')));
    match actions.as_slice() {
        [UpdateAction::StartServer { config, .. }] => {
            assert_eq!(config.port, 9000);
            assert_eq!(config.base_dir, PathBuf::from("/home/u"));
        }
        other => panic!("unexpected actions: {:?}", other),
    }
    // Nothing changes until the engine reports back
    assert_eq!(state.launcher.phase(), LauncherPhase::Stopped);
    assert!(state.take_events().is_empty());
}

#[test]
fn test_start_and_stop_round_trip() {
    let store = MemoryConfigStore::new();
    let mut state = test_state_with_store(store.clone());
    let initial_view = state.launcher.view().clone();

    let control = start_server(&mut state);
    assert_eq!(state.launcher.phase(), LauncherPhase::Running);
    assert_eq!(state.launcher.view().local.href, "http://localhost:8000");
    assert!(state.launcher.form().fields_disabled);
    assert!(store.get("main").is_some());

    run(&mut state, Message::LaunchClicked);
    assert!(!control.is_running());
    assert_eq!(state.launcher.view(), &initial_view);
    assert!(!state.launcher.form().fields_disabled);

    let labels: Vec<_> = state.take_events().iter().map(|e| e.event_type()).collect();
    assert_eq!(labels, vec!["started", "stopped"]);
}

#[test]
fn test_start_failure_is_reported() {
    let mut state = test_state();
    let actions = run(&mut state, Message::LaunchClicked);
    let Some(UpdateAction::StartServer { server_id, .. }) = actions.into_iter().next() else {
        panic!("expected StartServer");
    };

    run(
        &mut state,
        Message::ServerStartFailed {
            server_id,
            error: "port 8000 is already in use".into(),
        },
    );

    assert_eq!(state.launcher.phase(), LauncherPhase::Stopped);
    assert!(!state.launcher.form().fields_disabled);
    let status = state.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Error);
    assert_eq!(
        state.take_events(),
        vec![EngineEvent::Error {
            message: "port 8000 is already in use".into()
        }]
    );
}

#[test]
fn test_engine_exit_stops_launcher() {
    let mut state = test_state();
    start_server(&mut state);
    let server_id = state.launcher.session().server_id().unwrap();
    state.take_events();

    run(
        &mut state,
        Message::Server {
            server_id,
            event: ServerEvent::Exited { code: Some(1) },
        },
    );
    assert_eq!(state.launcher.phase(), LauncherPhase::Stopped);
    assert_eq!(state.take_events(), vec![EngineEvent::Stopped]);
}

#[test]
fn test_server_output_is_kept() {
    let mut state = test_state();
    run(
        &mut state,
        Message::Server {
            server_id: 1,
            event: ServerEvent::Output {
                stream: OutputStream::Stdout,
                line: "[Browsersync] Serving files from: /srv".into(),
            },
        },
    );
    assert_eq!(state.output.len(), 1);
    assert_eq!(state.take_events().len(), 1);
}

#[test]
fn test_typing_edits_focused_field() {
    let mut state = test_state();
    state.focus = Focus::Field(FieldId::Port);
    for c in "8080".chars() {
        run(&mut state, Message::Key(InputKey::Char(c)));
    }
    run(&mut state, Message::Key(InputKey::Backspace));
    assert_eq!(state.launcher.form().port, "808");
}

#[test]
fn test_space_toggles_checkbox() {
    let mut state = test_state();
    state.focus = Focus::Field(FieldId::Https);
    run(&mut state, Message::Key(InputKey::Char(' ')));
    assert!(state.launcher.form().https);
    run(&mut state, Message::Key(InputKey::Char(' ')));
    assert!(!state.launcher.form().https);
}

#[test]
fn test_edits_rejected_while_running() {
    let mut state = test_state();
    start_server(&mut state);
    state.focus = Focus::Field(FieldId::Host);
    run(&mut state, Message::Key(InputKey::Char('x')));
    assert_eq!(state.launcher.form().host, "");
}

#[test]
fn test_enter_on_base_dir_opens_prompt() {
    let mut state = test_state();
    run(&mut state, Message::Key(InputKey::Enter));

    let prompt = state.prompt.as_ref().unwrap();
    assert_eq!(prompt.input, "/home/u");
    assert_eq!(state.take_events(), vec![EngineEvent::DialogRequested]);

    // The single-slot guard holds while the prompt is open
    run(&mut state, Message::DirectoryDialogRequested);
    assert!(state.take_events().is_empty());
}

#[test]
fn test_prompt_selects_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = test_state();
    run(&mut state, Message::DirectoryDialogRequested);
    state.prompt.as_mut().unwrap().input.clear();
    run(
        &mut state,
        Message::Paste(dir.path().to_string_lossy().into_owned()),
    );
    run(&mut state, Message::Key(InputKey::Enter));

    assert!(state.prompt.is_none());
    assert_eq!(
        PathBuf::from(&state.launcher.form().base_dir),
        bslaunch_core::absolutize(dir.path())
    );
}

#[test]
fn test_prompt_rejects_missing_directory() {
    let mut state = test_state();
    run(&mut state, Message::DirectoryDialogRequested);
    state.prompt.as_mut().unwrap().input = "/definitely/not/here".into();
    run(&mut state, Message::Key(InputKey::Enter));

    let prompt = state.prompt.as_ref().unwrap();
    assert!(prompt.error.as_deref().unwrap().contains("Not a directory"));
}

#[test]
fn test_prompt_escape_cancels() {
    let mut state = test_state();
    run(&mut state, Message::DirectoryDialogRequested);
    state.take_events();
    run(&mut state, Message::Key(InputKey::Esc));

    assert!(state.prompt.is_none());
    assert!(!state.launcher.selector().dialog_outstanding());
    assert_eq!(state.take_events(), vec![EngineEvent::DialogCancelled]);
}

#[test]
fn test_selection_ignored_while_running() {
    let mut state = test_state();
    start_server(&mut state);
    run(&mut state, Message::DirectoryDialogRequested);
    assert!(state.prompt.is_none());

    run(
        &mut state,
        Message::DirectorySelected {
            path: PathBuf::from("/srv/other"),
        },
    );
    run(
        &mut state,
        Message::DirectoryDropped {
            entries: vec![DroppedEntry::new("/srv/other", "")],
        },
    );
    assert_eq!(state.launcher.form().base_dir, "");
}

#[test]
fn test_pasted_directory_is_a_drop() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = test_state();
    state.focus = Focus::Field(FieldId::Files);

    run(
        &mut state,
        Message::Paste(format!("'{}'", dir.path().display())),
    );
    assert_eq!(
        PathBuf::from(&state.launcher.form().base_dir),
        bslaunch_core::absolutize(dir.path())
    );
    assert_eq!(state.launcher.form().files, "");
}

#[cfg(unix)]
#[test]
fn test_pasted_file_url_is_decoded_into_a_drop() {
    let dir = tempfile::tempdir().unwrap();
    let site = dir.path().join("My Site");
    std::fs::create_dir(&site).unwrap();
    let payload = url::Url::from_file_path(&site).unwrap().to_string();
    assert!(payload.contains("My%20Site"));

    let mut state = test_state();
    state.focus = Focus::Field(FieldId::Host);
    run(&mut state, Message::Paste(payload));

    assert_eq!(
        PathBuf::from(&state.launcher.form().base_dir),
        bslaunch_core::absolutize(&site)
    );
    assert_eq!(state.launcher.form().host, "");
}

#[test]
fn test_pasted_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("index.html");
    std::fs::write(&file, "<html></html>").unwrap();
    let mut state = test_state();

    run(&mut state, Message::Paste(file.display().to_string()));
    assert_eq!(state.launcher.form().base_dir, "");
    assert_eq!(
        state.status.as_ref().map(|s| s.level),
        Some(StatusLevel::Error)
    );
}

#[test]
fn test_pasted_text_goes_to_field() {
    let mut state = test_state();
    state.focus = Focus::Field(FieldId::Files);
    run(&mut state, Message::Paste("**/*.html\n".into()));
    assert_eq!(state.launcher.form().files, "**/*.html");
}

#[test]
fn test_reset_clears_record() {
    let store = MemoryConfigStore::new();
    let mut state = test_state_with_store(store.clone());
    start_server(&mut state);
    run(&mut state, Message::LaunchClicked);
    assert!(store.get("main").is_some());

    run(&mut state, Message::Key(InputKey::CharCtrl('r')));
    assert!(store.get("main").is_none());
}

#[test]
fn test_reset_when_store_fails() {
    struct BrokenStore;

    impl ConfigStore for BrokenStore {
        fn save(&mut self, _: &str, _: &crate::config::PersistedConfig) -> bslaunch_core::Result<()> {
            Ok(())
        }

        fn load(&self, _: &str) -> bslaunch_core::Result<Option<crate::config::PersistedConfig>> {
            Ok(None)
        }

        fn clear(&mut self, _: &str) -> bslaunch_core::Result<()> {
            Err(bslaunch_core::Error::store("permission denied"))
        }
    }

    let launcher = LauncherInstance::new(
        "main",
        Box::new(BrokenStore),
        Defaults::with("/home/u", "192.168.1.20"),
        &UiBindings::all(),
    )
    .unwrap();
    let mut state = AppState::new(launcher, Settings::default());

    run(&mut state, Message::ResetClicked);
    assert_eq!(
        state.status.as_ref().map(|s| s.level),
        Some(StatusLevel::Error)
    );
}

#[test]
fn test_license_loaded_once() {
    let mut state = test_state();

    let actions = run(&mut state, Message::Key(InputKey::F(1)));
    assert_eq!(
        actions,
        vec![UpdateAction::LoadLicense {
            path: PathBuf::from("LICENSE.md")
        }]
    );
    run(
        &mut state,
        Message::LicenseLoaded {
            text: "MIT".into(),
        },
    );
    run(&mut state, Message::Key(InputKey::Esc));
    assert!(!state.license.is_open());

    let actions = run(&mut state, Message::LicenseRequested);
    assert!(actions.is_empty());
    assert!(state.license.is_open());
    assert_eq!(state.license.body(), "MIT");
}

#[test]
fn test_license_failure_retries() {
    let mut state = test_state();
    run(&mut state, Message::LicenseRequested);
    run(
        &mut state,
        Message::LicenseLoadFailed {
            error: "not found".into(),
        },
    );
    assert_eq!(state.license.body(), "LICENSE.md is not loaded.");

    run(&mut state, Message::LicenseClosed);
    let actions = run(&mut state, Message::LicenseRequested);
    assert_eq!(actions.len(), 1);
}

#[test]
fn test_drag_overlay() {
    let mut state = test_state();
    run(&mut state, Message::DragEnter);
    assert!(state.launcher.selector().overlay_active());
    run(&mut state, Message::DragLeave);
    assert!(!state.launcher.selector().overlay_active());
}
