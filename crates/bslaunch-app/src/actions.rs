//! Action handlers: UpdateAction dispatch and background task spawning

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use bslaunch_core::{LaunchConfig, ServerEvent};
use bslaunch_server::ServerEngine;

use crate::handler::UpdateAction;
use crate::license::read_license;
use crate::message::Message;
use crate::session::ServerId;

/// Buffer between an engine's readers and the message forwarder
const SERVER_EVENT_BUFFER: usize = 256;

/// Execute an action by spawning a background task
pub fn handle_action<E>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, engine: Arc<E>)
where
    E: ServerEngine + Send + Sync + 'static,
{
    match action {
        UpdateAction::StartServer { server_id, config } => {
            spawn_server_start(server_id, *config, msg_tx, engine);
        }

        UpdateAction::LoadLicense { path } => {
            spawn_license_load(path, msg_tx);
        }
    }
}

/// Start a server in the background.
///
/// Engine output is forwarded as `Message::Server` tagged with `server_id`;
/// the outcome arrives as `ServerStarted` or `ServerStartFailed`.
fn spawn_server_start<E>(
    server_id: ServerId,
    config: LaunchConfig,
    msg_tx: mpsc::Sender<Message>,
    engine: Arc<E>,
) where
    E: ServerEngine + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let (event_tx, event_rx) = mpsc::channel::<ServerEvent>(SERVER_EVENT_BUFFER);
        spawn_event_forwarder(server_id, event_rx, msg_tx.clone());

        info!("Starting Browsersync {} on port {}", server_id, config.port);
        let msg = match ServerEngine::start(engine.as_ref(), &config, event_tx).await {
            Ok(handle) => Message::ServerStarted {
                server_id,
                config: Box::new(config),
                handle,
            },
            Err(e) => {
                warn!("Browsersync {} failed to start: {}", server_id, e);
                Message::ServerStartFailed {
                    server_id,
                    error: e.to_string(),
                }
            }
        };

        if msg_tx.send(msg).await.is_err() {
            debug!("Message channel closed before start {} completed", server_id);
        }
    });
}

fn spawn_event_forwarder(
    server_id: ServerId,
    mut event_rx: mpsc::Receiver<ServerEvent>,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if msg_tx
                .send(Message::Server { server_id, event })
                .await
                .is_err()
            {
                break;
            }
        }
        debug!("Event forwarder for server {} finished", server_id);
    });
}

fn spawn_license_load(path: PathBuf, msg_tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let msg = match read_license(&path).await {
            Ok(text) => Message::LicenseLoaded { text },
            Err(e) => Message::LicenseLoadFailed {
                error: e.to_string(),
            },
        };
        let _ = msg_tx.send(msg).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bslaunch_core::OpenMode;
    use bslaunch_server::test_utils::{MockEngine, MockOutcome};
    use std::time::Duration;

    fn config(dir: &std::path::Path) -> Box<LaunchConfig> {
        Box::new(
            LaunchConfig::new(
                dir.to_path_buf(),
                "**/*.*",
                format!("{}/**/*.*", dir.display()),
                "0.0.0.0",
                8000,
                false,
                false,
                OpenMode::Disabled,
            )
            .unwrap(),
        )
    }

    async fn recv(rx: &mut mpsc::Receiver<Message>) -> Message {
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for message")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_start_server_reports_started() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(MockEngine::new());
        let (tx, mut rx) = mpsc::channel(16);

        handle_action(
            UpdateAction::StartServer {
                server_id: 7,
                config: config(dir.path()),
            },
            tx,
            engine.clone(),
        );

        match recv(&mut rx).await {
            Message::ServerStarted {
                server_id, handle, ..
            } => {
                assert_eq!(server_id, 7);
                assert!(handle.is_running());
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert_eq!(engine.start_count(), 1);
    }

    #[tokio::test]
    async fn test_start_failure_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(MockEngine::new());
        engine.push_outcome(MockOutcome::Fail("port 8000 is already in use".into()));
        let (tx, mut rx) = mpsc::channel(16);

        handle_action(
            UpdateAction::StartServer {
                server_id: 3,
                config: config(dir.path()),
            },
            tx,
            engine,
        );

        match recv(&mut rx).await {
            Message::ServerStartFailed { server_id, error } => {
                assert_eq!(server_id, 3);
                assert!(error.contains("port 8000 is already in use"));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_events_are_tagged() {
        let dir = tempfile::tempdir().unwrap();
        let engine = Arc::new(MockEngine::new());
        let (tx, mut rx) = mpsc::channel(16);

        handle_action(
            UpdateAction::StartServer {
                server_id: 5,
                config: config(dir.path()),
            },
            tx,
            engine.clone(),
        );
        assert!(matches!(recv(&mut rx).await, Message::ServerStarted { .. }));

        engine.servers()[0].crash(Some(1));
        match recv(&mut rx).await {
            Message::Server { server_id, event } => {
                assert_eq!(server_id, 5);
                assert_eq!(event, ServerEvent::Exited { code: Some(1) });
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_license_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LICENSE.md");
        std::fs::write(&path, "MIT").unwrap();
        let (tx, mut rx) = mpsc::channel(4);

        handle_action(
            UpdateAction::LoadLicense { path },
            tx.clone(),
            Arc::new(MockEngine::new()),
        );
        assert!(matches!(
            recv(&mut rx).await,
            Message::LicenseLoaded { text } if text == "MIT"
        ));

        handle_action(
            UpdateAction::LoadLicense {
                path: dir.path().join("missing.md"),
            },
            tx,
            Arc::new(MockEngine::new()),
        );
        assert!(matches!(
            recv(&mut rx).await,
            Message::LicenseLoadFailed { .. }
        ));
    }
}
