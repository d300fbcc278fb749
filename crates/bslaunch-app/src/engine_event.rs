//! Domain events emitted by the Engine for external consumers
//!
//! Events are collected while a message is processed and broadcast once the
//! update cycle finishes, so subscribers (the headless runner, tests) see
//! them in the order they happened.

use std::path::PathBuf;

use bslaunch_core::{LaunchConfig, LauncherEvent, OutputStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Launcher Lifecycle
    // ─────────────────────────────────────────────────────────
    /// The server is running with this config
    Started { config: LaunchConfig },

    /// The server stopped (user or engine exit)
    Stopped,

    // ─────────────────────────────────────────────────────────
    // Base Directory Selection
    // ─────────────────────────────────────────────────────────
    BaseDirSelected { path: PathBuf },

    /// The host should show a directory dialog
    DialogRequested,

    DialogCancelled,

    // ─────────────────────────────────────────────────────────
    // Server Output
    // ─────────────────────────────────────────────────────────
    ServerOutput { stream: OutputStream, line: String },

    // ─────────────────────────────────────────────────────────
    // License / Errors
    // ─────────────────────────────────────────────────────────
    LicenseLoaded { text: String },

    /// A recoverable failure shown to the user
    Error { message: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Stopped => "stopped",
            Self::BaseDirSelected { .. } => "base_dir_selected",
            Self::DialogRequested => "dialog_requested",
            Self::DialogCancelled => "dialog_cancelled",
            Self::ServerOutput { .. } => "server_output",
            Self::LicenseLoaded { .. } => "license_loaded",
            Self::Error { .. } => "error",
            Self::Shutdown => "shutdown",
        }
    }
}

impl From<LauncherEvent> for EngineEvent {
    fn from(event: LauncherEvent) -> Self {
        match event {
            LauncherEvent::Started { config } => Self::Started { config },
            LauncherEvent::Stopped => Self::Stopped,
            LauncherEvent::BaseDirSelected { path } => Self::BaseDirSelected { path },
            LauncherEvent::DialogCancelled => Self::DialogCancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launcher_events_keep_their_labels() {
        let events = [
            LauncherEvent::Stopped,
            LauncherEvent::DialogCancelled,
            LauncherEvent::BaseDirSelected {
                path: PathBuf::from("/srv"),
            },
        ];
        for event in events {
            let label = event.event_type();
            assert_eq!(EngineEvent::from(event).event_type(), label);
        }
    }

    #[test]
    fn test_event_type_labels() {
        assert_eq!(EngineEvent::DialogRequested.event_type(), "dialog_requested");
        assert_eq!(
            EngineEvent::Error {
                message: "boom".into()
            }
            .event_type(),
            "error"
        );
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
    }
}
