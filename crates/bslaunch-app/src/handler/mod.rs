//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `lifecycle`: Launch/stop, reset and server engine results
//! - `directory`: Directory dialog, drops and drag feedback
//! - `license`: License viewer
//! - `keys`: Key and paste handling

pub(crate) mod directory;
pub(crate) mod keys;
pub(crate) mod license;
pub(crate) mod lifecycle;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use bslaunch_core::LaunchConfig;

use crate::message::Message;
use crate::session::ServerId;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Start a server; the result comes back as `ServerStarted` or
    /// `ServerStartFailed` carrying `server_id`
    StartServer {
        server_id: ServerId,
        config: Box<LaunchConfig>,
    },

    /// Read the license file; answered by `LicenseLoaded` / `LicenseLoadFailed`
    LoadLicense { path: PathBuf },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
