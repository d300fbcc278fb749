//! Event types shared between the server engine and the launcher

use std::path::PathBuf;

use crate::types::LaunchConfig;

/// Lifecycle and selection events dispatched through the launcher event bus.
///
/// Listeners run synchronously, in registration order, before the handler
/// that emitted the event returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherEvent {
    /// The server engine reported a successful start with this config
    Started { config: LaunchConfig },

    /// The server was stopped (by the user or because the engine exited)
    Stopped,

    /// A base directory was chosen from the dialog or a drop
    BaseDirSelected { path: PathBuf },

    /// The directory dialog closed without a choice
    DialogCancelled,
}

impl LauncherEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Stopped => "stopped",
            Self::BaseDirSelected { .. } => "base_dir_selected",
            Self::DialogCancelled => "dialog_cancelled",
        }
    }
}

/// Which pipe of the engine process a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Notifications from a running engine process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// A line of output (ANSI codes stripped)
    Output { stream: OutputStream, line: String },

    /// The engine process exited
    Exited { code: Option<i32> },
}
