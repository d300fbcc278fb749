//! Scripted server engine for tests
//!
//! [`MockEngine`] answers `start` calls from a queue of outcomes (defaulting
//! to success) and records every config it was asked to start.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use bslaunch_core::prelude::*;
use bslaunch_core::{LaunchConfig, ServerEvent, ServerInfo};

use crate::engine::{ServerControl, ServerEngine, ServerHandle};

/// What the next `start` call does
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Report ready with addresses derived from the config
    Ready,
    /// Fail with `Error::ServerStart { reason }`
    Fail(String),
}

/// A fake server that reports `Exited` when stopped
pub struct MockServer {
    running: AtomicBool,
    event_tx: mpsc::Sender<ServerEvent>,
}

impl MockServer {
    /// Simulate the engine exiting on its own
    pub fn crash(&self, code: Option<i32>) {
        if self.running.swap(false, Ordering::SeqCst) {
            let _ = self.event_tx.try_send(ServerEvent::Exited { code });
        }
    }

    /// Simulate a line of engine output
    pub fn emit_line(&self, line: &str) {
        let _ = self.event_tx.try_send(ServerEvent::Output {
            stream: bslaunch_core::OutputStream::Stdout,
            line: line.to_string(),
        });
    }
}

impl ServerControl for MockServer {
    fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            let _ = self.event_tx.try_send(ServerEvent::Exited { code: None });
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct MockState {
    outcomes: VecDeque<MockOutcome>,
    starts: Vec<LaunchConfig>,
    servers: Vec<Arc<MockServer>>,
}

/// Scripted [`ServerEngine`]
#[derive(Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<MockState>>,
    start_delay: Option<Duration>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every start, to open a window for overlapping requests
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = Some(delay);
        self
    }

    /// Queue the outcome of a future `start` call
    pub fn push_outcome(&self, outcome: MockOutcome) {
        self.state.lock().unwrap().outcomes.push_back(outcome);
    }

    /// Configs passed to `start`, in call order
    pub fn starts(&self) -> Vec<LaunchConfig> {
        self.state.lock().unwrap().starts.clone()
    }

    pub fn start_count(&self) -> usize {
        self.state.lock().unwrap().starts.len()
    }

    /// Servers created by successful starts, in creation order
    pub fn servers(&self) -> Vec<Arc<MockServer>> {
        self.state.lock().unwrap().servers.clone()
    }

    pub fn running_count(&self) -> usize {
        self.servers().iter().filter(|s| s.is_running()).count()
    }
}

/// Addresses a real engine would report for `config`
pub fn info_for(config: &LaunchConfig) -> ServerInfo {
    ServerInfo {
        local: Some(config.local_url()),
        external: Some(config.external_url()),
        ui: config.ui_url(),
        ui_external: config
            .ui_port()
            .map(|port| format!("http://{}:{}", config.host, port)),
        serving_from: Some(config.base_dir.clone()),
    }
}

impl ServerEngine for MockEngine {
    async fn start(
        &self,
        config: &LaunchConfig,
        event_tx: mpsc::Sender<ServerEvent>,
    ) -> Result<ServerHandle> {
        let outcome = {
            let mut state = self.state.lock().unwrap();
            state.starts.push(config.clone());
            state.outcomes.pop_front().unwrap_or(MockOutcome::Ready)
        };

        if let Some(delay) = self.start_delay {
            tokio::time::sleep(delay).await;
        }

        match outcome {
            MockOutcome::Ready => {
                let server = Arc::new(MockServer {
                    running: AtomicBool::new(true),
                    event_tx,
                });
                self.state.lock().unwrap().servers.push(Arc::clone(&server));
                Ok(ServerHandle::new(None, info_for(config), server))
            }
            MockOutcome::Fail(reason) => Err(Error::server_start(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bslaunch_core::OpenMode;
    use std::path::PathBuf;

    fn config() -> LaunchConfig {
        LaunchConfig::new(
            PathBuf::from("/srv/site"),
            "**/*.*",
            "/srv/site/**/*.*",
            "192.168.1.20",
            8000,
            false,
            true,
            OpenMode::Disabled,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_scripted_outcomes() {
        let engine = MockEngine::new();
        engine.push_outcome(MockOutcome::Fail("port in use".into()));
        let (tx, _rx) = mpsc::channel(8);

        let first = ServerEngine::start(&engine, &config(), tx.clone()).await;
        assert!(matches!(first, Err(Error::ServerStart { .. })));

        let second = ServerEngine::start(&engine, &config(), tx).await.unwrap();
        assert!(second.is_running());
        assert_eq!(second.info().local.as_deref(), Some("http://localhost:8000"));
        assert_eq!(engine.start_count(), 2);
    }

    #[tokio::test]
    async fn test_stop_reports_exit() {
        let engine = MockEngine::new();
        let (tx, mut rx) = mpsc::channel(8);

        let handle = ServerEngine::start(&engine, &config(), tx).await.unwrap();
        handle.stop();
        handle.stop();

        assert_eq!(rx.recv().await, Some(ServerEvent::Exited { code: None }));
        assert!(rx.try_recv().is_err());
        assert_eq!(engine.running_count(), 0);
    }
}
