//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use bslaunch_core::{LaunchConfig, ServerEvent};
use bslaunch_server::ServerHandle;

use crate::directory::DroppedEntry;
use crate::form::FieldId;
use crate::input_key::InputKey;
use crate::session::ServerId;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from the terminal
    Key(InputKey),

    /// Bracketed paste from the terminal (dropped paths arrive this way)
    Paste(String),

    /// Tick event for periodic updates
    Tick,

    /// Quit (Ctrl+C, signal handler, `quit` command)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Launcher Controls
    // ─────────────────────────────────────────────────────────
    /// Launch button: start when stopped, stop when running
    LaunchClicked,

    /// Reset button: clear the stored record
    ResetClicked,

    /// Replace a text field's value
    FieldEdited { field: FieldId, value: String },

    /// Set a checkbox
    FieldChecked { field: FieldId, checked: bool },

    // ─────────────────────────────────────────────────────────
    // Base Directory Selection
    // ─────────────────────────────────────────────────────────
    /// Ask the host to open a directory dialog
    DirectoryDialogRequested,

    /// The dialog returned a directory
    DirectorySelected { path: PathBuf },

    /// The dialog closed without a choice
    DirectorySelectionCancelled,

    /// Entries dropped onto the panel
    DirectoryDropped { entries: Vec<DroppedEntry> },

    /// A drag entered the panel
    DragEnter,

    /// A drag left the panel
    DragLeave,

    // ─────────────────────────────────────────────────────────
    // License Viewer
    // ─────────────────────────────────────────────────────────
    LicenseRequested,
    LicenseClosed,
    LicenseLoaded { text: String },
    LicenseLoadFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Server Engine
    // ─────────────────────────────────────────────────────────
    /// The engine is listening
    ServerStarted {
        server_id: ServerId,
        config: Box<LaunchConfig>,
        handle: ServerHandle,
    },

    /// The engine failed to start
    ServerStartFailed { server_id: ServerId, error: String },

    /// Output or exit of a started engine
    Server {
        server_id: ServerId,
        event: ServerEvent,
    },
}
