//! Server engine seam
//!
//! The launcher never talks to Browsersync directly. It goes through
//! [`ServerEngine`], which starts a server for a [`LaunchConfig`] and hands
//! back a [`ServerHandle`] for stopping it and checking whether it is alive.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use bslaunch_core::prelude::*;
use bslaunch_core::{LaunchConfig, ServerEvent, ServerInfo};

use crate::args::build_args;
use crate::process::BrowsersyncProcess;

/// Default executable name looked up on `PATH`
pub const DEFAULT_COMMAND: &str = "browser-sync";

/// Control surface of a started server
pub trait ServerControl: Send + Sync {
    /// Request the server to stop. Idempotent.
    fn stop(&self);

    fn is_running(&self) -> bool;
}

/// Cloneable handle to a started server.
///
/// Dropping the last handle to a real process kills it.
#[derive(Clone)]
pub struct ServerHandle {
    pid: Option<u32>,
    info: ServerInfo,
    control: Arc<dyn ServerControl>,
}

impl ServerHandle {
    pub fn new(pid: Option<u32>, info: ServerInfo, control: Arc<dyn ServerControl>) -> Self {
        Self { pid, info, control }
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Addresses the engine reported once it was ready
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn stop(&self) {
        self.control.stop();
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }
}

impl fmt::Debug for ServerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerHandle")
            .field("pid", &self.pid)
            .field("info", &self.info)
            .field("running", &self.is_running())
            .finish()
    }
}

/// Starts live-reload servers.
///
/// `start` resolves once the server is accepting connections, or fails with
/// the engine's error. Output and the eventual exit are reported on
/// `event_tx`.
#[trait_variant::make(ServerEngine: Send)]
pub trait LocalServerEngine {
    async fn start(
        &self,
        config: &LaunchConfig,
        event_tx: mpsc::Sender<ServerEvent>,
    ) -> Result<ServerHandle>;
}

/// Engine backed by the `browser-sync` CLI
#[derive(Debug, Clone)]
pub struct BrowsersyncEngine {
    command: String,
    extra_args: Vec<String>,
}

impl Default for BrowsersyncEngine {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND, Vec::new())
    }
}

impl BrowsersyncEngine {
    pub fn new(command: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            extra_args,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Locate the executable on `PATH` (or accept an explicit path)
    pub fn resolve_program(&self) -> Result<PathBuf> {
        which::which(&self.command).map_err(|e| {
            debug!("which({}) failed: {}", self.command, e);
            Error::engine_not_found(&self.command)
        })
    }
}

impl ServerEngine for BrowsersyncEngine {
    async fn start(
        &self,
        config: &LaunchConfig,
        event_tx: mpsc::Sender<ServerEvent>,
    ) -> Result<ServerHandle> {
        if !config.base_dir().is_dir() {
            return Err(Error::not_a_directory(config.base_dir()));
        }

        let program = self.resolve_program()?;
        let args = build_args(config, &self.extra_args);

        let (process, ready_rx) =
            BrowsersyncProcess::spawn(&program, &args, config.base_dir(), event_tx)?;
        let process = Arc::new(process);

        match ready_rx.await {
            Ok(info) => {
                info!(
                    "Browsersync ready: local={:?} external={:?}",
                    info.local, info.external
                );
                let pid = process.id();
                Ok(ServerHandle::new(pid, info, process))
            }
            Err(_) => {
                let code = process.wait_exited().await;
                warn!("Browsersync exited before it was ready (code {:?})", code);
                Err(match process.last_error() {
                    Some(reason) => Error::server_start(reason),
                    None => Error::ServerExitedEarly { code },
                })
            }
        }
    }
}
