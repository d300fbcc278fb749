//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Server Engine Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Browsersync executable '{command}' not found. Install it with `npm install -g browser-sync`.")]
    EngineNotFound { command: String },

    #[error("Failed to spawn Browsersync: {reason}")]
    ProcessSpawn { reason: String },

    #[error("Browsersync failed to start: {reason}")]
    ServerStart { reason: String },

    #[error("Browsersync exited before it was ready (code: {code:?})")]
    ServerExitedEarly { code: Option<i32> },

    #[error("Server is not running")]
    NotRunning,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Config store error: {message}")]
    Store { message: String },

    // ─────────────────────────────────────────────────────────────
    // Launcher/UI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{routine}: {bindings} element(s) are required")]
    MissingBinding {
        routine: &'static str,
        bindings: String,
    },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read license file {path}: {reason}")]
    LicenseRead { path: PathBuf, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn engine_not_found(command: impl Into<String>) -> Self {
        Self::EngineNotFound {
            command: command.into(),
        }
    }

    pub fn server_start(reason: impl Into<String>) -> Self {
        Self::ServerStart {
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    pub fn missing_binding(routine: &'static str, bindings: impl Into<String>) -> Self {
        Self::MissingBinding {
            routine,
            bindings: bindings.into(),
        }
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    pub fn license_read(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::LicenseRead {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::EngineNotFound { .. }
                | Error::ProcessSpawn { .. }
                | Error::ServerStart { .. }
                | Error::ServerExitedEarly { .. }
                | Error::NotRunning
                | Error::Store { .. }
                | Error::NotADirectory { .. }
                | Error::LicenseRead { .. }
                | Error::ChannelSend { .. }
        )
    }

    /// Check if this error should trigger application exit
    ///
    /// Only structural misconfiguration found while constructing the
    /// launcher is fatal; runtime failures are surfaced to the user.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::MissingBinding { .. } | Error::Terminal { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
