//! Server session: the single owner of "is the server running"
//!
//! Starting is asynchronous and happens outside the TEA loop; the session
//! only hands out request ids and records the outcome. `active` flips to
//! true when a started server is attached and back to false on stop or exit.

use bslaunch_core::prelude::*;
use bslaunch_core::LaunchConfig;
use bslaunch_server::ServerHandle;

/// Identifies one start request and the server it produced
pub type ServerId = u64;

/// Why a started server was not attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachRejected {
    /// Another server became active first; the late one was stopped
    AlreadyActive,
    /// The server died between reporting ready and being attached
    NotRunning,
}

#[derive(Debug)]
struct ActiveServer {
    id: ServerId,
    config: LaunchConfig,
    handle: ServerHandle,
}

#[derive(Debug, Default)]
pub struct ServerSession {
    active: Option<ActiveServer>,
    next_id: ServerId,
}

impl ServerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the id for a new start request
    pub fn next_request(&mut self) -> ServerId {
        self.next_id += 1;
        self.next_id
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Config of the running server
    pub fn config(&self) -> Option<&LaunchConfig> {
        self.active.as_ref().map(|a| &a.config)
    }

    pub fn handle(&self) -> Option<&ServerHandle> {
        self.active.as_ref().map(|a| &a.handle)
    }

    pub fn server_id(&self) -> Option<ServerId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Record a successful start.
    ///
    /// A server finishing its start while another is already active is
    /// stopped immediately.
    pub fn attach(
        &mut self,
        id: ServerId,
        config: LaunchConfig,
        handle: ServerHandle,
    ) -> std::result::Result<(), AttachRejected> {
        if self.active.is_some() {
            warn!("Server {} started while another is active, stopping it", id);
            handle.stop();
            return Err(AttachRejected::AlreadyActive);
        }
        if !handle.is_running() {
            return Err(AttachRejected::NotRunning);
        }

        debug!("Server {} attached (pid: {:?})", id, handle.pid());
        self.active = Some(ActiveServer { id, config, handle });
        Ok(())
    }

    /// Stop the running server. No-op when inactive.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(server) => {
                info!("Stopping server {}", server.id);
                server.handle.stop();
                true
            }
            None => false,
        }
    }

    /// The server with `id` exited on its own. Returns `true` if it was the
    /// active one.
    pub fn exited(&mut self, id: ServerId) -> bool {
        if self.server_id() == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
