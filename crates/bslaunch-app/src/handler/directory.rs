//! Directory dialog, drops and drag feedback

use std::path::PathBuf;

use bslaunch_core::prelude::*;

use crate::directory::DroppedEntry;
use crate::engine_event::EngineEvent;
use crate::state::{AppState, DirectoryPrompt, StatusLevel};

use super::UpdateResult;

pub fn handle_dialog_requested(state: &mut AppState) -> UpdateResult {
    if !state.launcher.request_dialog() {
        debug!("Directory dialog request ignored");
        return UpdateResult::none();
    }

    let form = state.launcher.form();
    let initial = if form.base_dir.is_empty() {
        form.placeholders.base_dir.clone()
    } else {
        form.base_dir.clone()
    };
    state.prompt = Some(DirectoryPrompt::new(initial));
    state.emit(EngineEvent::DialogRequested);
    UpdateResult::none()
}

pub fn handle_directory_selected(state: &mut AppState, path: PathBuf) -> UpdateResult {
    state.prompt = None;
    match state.launcher.dialog_selected(&path) {
        Some(selected) => {
            info!("Base directory selected: {}", selected.display());
            state.set_status(
                StatusLevel::Info,
                format!("Base directory: {}", selected.display()),
            );
        }
        None => debug!("Directory selection ignored while running"),
    }
    UpdateResult::none()
}

pub fn handle_selection_cancelled(state: &mut AppState) -> UpdateResult {
    state.prompt = None;
    state.launcher.dialog_cancelled();
    UpdateResult::none()
}

pub fn handle_dropped(state: &mut AppState, entries: Vec<DroppedEntry>) -> UpdateResult {
    let running = state.launcher.is_active();
    match state.launcher.drop_entries(&entries) {
        Some(selected) => {
            info!("Base directory dropped: {}", selected.display());
            state.set_status(
                StatusLevel::Info,
                format!("Base directory: {}", selected.display()),
            );
        }
        None if running => debug!("Drop ignored while running"),
        None => {
            if !entries.is_empty() {
                state.set_status(StatusLevel::Error, "Only a directory can be dropped");
            }
        }
    }
    UpdateResult::none()
}
