//! Key and paste handling
//!
//! Overlays take keys first: the directory prompt, then the license viewer,
//! then the panel itself.

use bslaunch_core::prelude::*;

use crate::directory::{normalize_selection, parse_drop_payload, DroppedEntry};
use crate::form::FieldId;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, Focus};

/// Convert key events to messages
pub fn handle_key(state: &mut AppState, key: InputKey) -> Option<Message> {
    if matches!(key, InputKey::CharCtrl('c') | InputKey::CharCtrl('q')) {
        return Some(Message::Quit);
    }

    if state.prompt.is_some() {
        return handle_key_prompt(state, key);
    }
    if state.license.is_open() {
        return handle_key_license(state, key);
    }
    handle_key_panel(state, key)
}

fn handle_key_prompt(state: &mut AppState, key: InputKey) -> Option<Message> {
    let prompt = state.prompt.as_mut()?;

    match key {
        InputKey::Esc => Some(Message::DirectorySelectionCancelled),
        InputKey::Enter => {
            let input = prompt.input.trim();
            if input.is_empty() {
                return Some(Message::DirectorySelectionCancelled);
            }
            let path = normalize_selection(std::path::Path::new(input));
            if path.is_dir() {
                Some(Message::DirectorySelected { path })
            } else {
                prompt.error = Some(format!("Not a directory: {}", path.display()));
                None
            }
        }
        InputKey::Char(c) => {
            prompt.input.push(c);
            prompt.error = None;
            None
        }
        InputKey::Backspace => {
            prompt.input.pop();
            prompt.error = None;
            None
        }
        _ => None,
    }
}

fn handle_key_license(state: &mut AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::Enter | InputKey::Char('q') | InputKey::F(1) => {
            Some(Message::LicenseClosed)
        }
        InputKey::Down | InputKey::Char('j') => {
            state.license.scroll_down();
            None
        }
        InputKey::Up | InputKey::Char('k') => {
            state.license.scroll_up();
            None
        }
        _ => None,
    }
}

fn handle_key_panel(state: &mut AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('l') => return Some(Message::LaunchClicked),
        InputKey::CharCtrl('r') => return Some(Message::ResetClicked),
        InputKey::CharCtrl('o') => return Some(Message::DirectoryDialogRequested),
        InputKey::F(1) => return Some(Message::LicenseRequested),
        InputKey::Tab | InputKey::Down => {
            state.focus = state.focus.next();
            return None;
        }
        InputKey::BackTab | InputKey::Up => {
            state.focus = state.focus.prev();
            return None;
        }
        _ => {}
    }

    match state.focus {
        Focus::Launch => match key {
            InputKey::Enter | InputKey::Char(' ') => Some(Message::LaunchClicked),
            _ => None,
        },
        Focus::Reset => match key {
            InputKey::Enter | InputKey::Char(' ') => Some(Message::ResetClicked),
            _ => None,
        },
        Focus::Field(field) if field.is_checkbox() => match key {
            InputKey::Enter | InputKey::Char(' ') => {
                let checked = state.launcher.form().checked(field)?;
                Some(Message::FieldChecked {
                    field,
                    checked: !checked,
                })
            }
            _ => None,
        },
        Focus::Field(field) => handle_key_text_field(state, field, key),
    }
}

fn handle_key_text_field(state: &mut AppState, field: FieldId, key: InputKey) -> Option<Message> {
    if key == InputKey::Enter {
        if field == FieldId::BaseDir {
            return Some(Message::DirectoryDialogRequested);
        }
        state.focus = state.focus.next();
        return None;
    }

    let mut value = state.launcher.form().text(field)?.to_string();
    match key {
        InputKey::Char(c) => value.push(c),
        InputKey::Backspace | InputKey::Delete => {
            value.pop()?;
        }
        _ => return None,
    }
    Some(Message::FieldEdited { field, value })
}

/// Convert a bracketed paste.
///
/// The prompt takes pasted text as input. Otherwise a payload naming
/// existing paths is treated as a drop, and anything else goes into the
/// focused text field.
pub fn handle_paste(state: &mut AppState, text: &str) -> Option<Message> {
    if let Some(prompt) = state.prompt.as_mut() {
        prompt.input.push_str(text.trim_end_matches(['\r', '\n']));
        prompt.error = None;
        return None;
    }
    if state.license.is_open() {
        return None;
    }

    let paths = parse_drop_payload(text);
    if paths.first().is_some_and(|p| p.exists()) {
        debug!("Paste treated as a drop of {} entries", paths.len());
        let entries = paths.into_iter().map(DroppedEntry::from_path).collect();
        return Some(Message::DirectoryDropped { entries });
    }

    let field = state.focus.field().filter(|f| !f.is_checkbox())?;
    let mut value = state.launcher.form().text(field)?.to_string();
    value.push_str(text.trim_end_matches(['\r', '\n']));
    Some(Message::FieldEdited { field, value })
}
