//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{directory, keys, license, lifecycle, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => match keys::handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Paste(text) => match keys::handle_paste(state, &text) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Launcher Controls
        // ─────────────────────────────────────────────────────────
        Message::LaunchClicked => lifecycle::handle_launch_clicked(state),
        Message::ResetClicked => lifecycle::handle_reset_clicked(state),
        Message::FieldEdited { field, value } => {
            lifecycle::handle_field_edited(state, field, value)
        }
        Message::FieldChecked { field, checked } => {
            lifecycle::handle_field_checked(state, field, checked)
        }

        // ─────────────────────────────────────────────────────────
        // Base Directory Selection
        // ─────────────────────────────────────────────────────────
        Message::DirectoryDialogRequested => directory::handle_dialog_requested(state),
        Message::DirectorySelected { path } => directory::handle_directory_selected(state, path),
        Message::DirectorySelectionCancelled => directory::handle_selection_cancelled(state),
        Message::DirectoryDropped { entries } => directory::handle_dropped(state, entries),
        Message::DragEnter => {
            state.launcher.drag_enter();
            UpdateResult::none()
        }
        Message::DragLeave => {
            state.launcher.drag_leave();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // License Viewer
        // ─────────────────────────────────────────────────────────
        Message::LicenseRequested => license::handle_license_requested(state),
        Message::LicenseClosed => {
            state.license.close();
            UpdateResult::none()
        }
        Message::LicenseLoaded { text } => license::handle_license_loaded(state, text),
        Message::LicenseLoadFailed { error } => license::handle_license_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Server Engine
        // ─────────────────────────────────────────────────────────
        Message::ServerStarted {
            server_id,
            config,
            handle,
        } => lifecycle::handle_server_started(state, server_id, *config, handle),
        Message::ServerStartFailed { server_id, error } => {
            lifecycle::handle_server_start_failed(state, server_id, error)
        }
        Message::Server { server_id, event } => {
            lifecycle::handle_server_event(state, server_id, event)
        }
    }
}
