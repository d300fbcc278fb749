//! bslaunch-tui - Terminal UI for Browsersync Launcher
//!
//! This crate provides the ratatui-based control panel. It takes an Engine
//! from bslaunch-app and adds terminal rendering, event polling and the
//! panel widgets.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;

use bslaunch_app::{Binding, UiBindings};

/// The launcher elements this front-end renders.
///
/// The form carries the base directory field and both buttons, the drop
/// overlay covers the form while a paste is pending, and the header hint
/// opens the license overlay.
pub fn ui_bindings() -> UiBindings {
    UiBindings::none()
        // FormView
        .with(Binding::BaseDirField)
        .with(Binding::LaunchButton)
        .with(Binding::ResetButton)
        // DropOverlay
        .with(Binding::Droppable)
        .with(Binding::Overlay)
        // MainHeader
        .with(Binding::LicenseInfo)
        .with(Binding::LicenseLink)
        // LicenseOverlay
        .with(Binding::LicenseBody)
        .with(Binding::LicenseClose)
}
