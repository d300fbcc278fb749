//! Launch/stop, reset and server engine results

use bslaunch_core::prelude::*;
use bslaunch_core::{LaunchConfig, ServerEvent};
use bslaunch_server::ServerHandle;

use crate::engine_event::EngineEvent;
use crate::form::FieldId;
use crate::launcher::LaunchDecision;
use crate::session::{AttachRejected, ServerId};
use crate::state::{AppState, StatusLevel};

use super::{UpdateAction, UpdateResult};

pub fn handle_launch_clicked(state: &mut AppState) -> UpdateResult {
    match state.launcher.launch_clicked() {
        LaunchDecision::Stopped => {
            state.set_status(StatusLevel::Info, "Browsersync stopped");
            UpdateResult::none()
        }
        LaunchDecision::Start { server_id, config } => {
            state.set_status(
                StatusLevel::Info,
                format!(
                    "Starting Browsersync for {} on port {}...",
                    config.base_dir().display(),
                    config.port
                ),
            );
            UpdateResult::action(UpdateAction::StartServer {
                server_id,
                config: Box::new(config),
            })
        }
    }
}

pub fn handle_reset_clicked(state: &mut AppState) -> UpdateResult {
    match state.launcher.reset_clicked() {
        Ok(true) => state.set_status(StatusLevel::Info, "Saved configuration cleared"),
        Ok(false) => debug!("Reset ignored while running"),
        Err(e) => {
            warn!("Failed to clear saved configuration: {}", e);
            state.report_error(e.to_string());
        }
    }
    UpdateResult::none()
}

pub fn handle_field_edited(state: &mut AppState, field: FieldId, value: String) -> UpdateResult {
    if !state.launcher.form_mut().set_text(field, value) {
        trace!("Edit of {:?} rejected", field);
    }
    UpdateResult::none()
}

pub fn handle_field_checked(state: &mut AppState, field: FieldId, checked: bool) -> UpdateResult {
    if !state.launcher.form_mut().set_checked(field, checked) {
        trace!("Toggle of {:?} rejected", field);
    }
    UpdateResult::none()
}

pub fn handle_server_started(
    state: &mut AppState,
    server_id: ServerId,
    config: LaunchConfig,
    handle: ServerHandle,
) -> UpdateResult {
    let url = handle
        .info()
        .local
        .clone()
        .unwrap_or_else(|| config.local_url());

    match state.launcher.start_completed(server_id, config, handle) {
        Ok(()) => {
            info!("Browsersync {} running at {}", server_id, url);
            state.set_status(StatusLevel::Info, format!("Browsersync running at {}", url));
        }
        Err(AttachRejected::AlreadyActive) => {
            state.report_error("Browsersync was started twice; the second instance was stopped");
        }
        Err(AttachRejected::NotRunning) => {
            state.report_error("Browsersync exited right after starting");
        }
    }
    UpdateResult::none()
}

pub fn handle_server_start_failed(
    state: &mut AppState,
    server_id: ServerId,
    error: String,
) -> UpdateResult {
    warn!("Start request {} failed: {}", server_id, error);
    state.report_error(error);
    UpdateResult::none()
}

pub fn handle_server_event(
    state: &mut AppState,
    server_id: ServerId,
    event: ServerEvent,
) -> UpdateResult {
    match event {
        ServerEvent::Output { stream, line } => {
            state.push_output(stream, line.clone());
            state.emit(EngineEvent::ServerOutput { stream, line });
        }
        ServerEvent::Exited { code } => {
            if state.launcher.server_exited(server_id) {
                let text = match code {
                    Some(code) => format!("Browsersync exited (code {})", code),
                    None => "Browsersync exited".to_string(),
                };
                warn!("{}", text);
                state.set_status(StatusLevel::Error, text);
            } else {
                debug!("Server {} exited (code {:?})", server_id, code);
            }
        }
    }
    UpdateResult::none()
}
