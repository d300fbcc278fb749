//! License viewer

use bslaunch_core::prelude::*;

use crate::engine_event::EngineEvent;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_license_requested(state: &mut AppState) -> UpdateResult {
    if state.license.request() {
        UpdateResult::action(UpdateAction::LoadLicense {
            path: state.settings.license.path.clone(),
        })
    } else {
        UpdateResult::none()
    }
}

pub fn handle_license_loaded(state: &mut AppState, text: String) -> UpdateResult {
    state.license.loaded(text.clone());
    state.emit(EngineEvent::LicenseLoaded { text });
    UpdateResult::none()
}

pub fn handle_license_failed(state: &mut AppState, error: String) -> UpdateResult {
    warn!("{}", error);
    state.license.load_failed();
    state.emit(EngineEvent::Error { message: error });
    UpdateResult::none()
}
