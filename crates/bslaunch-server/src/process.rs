//! Browsersync child process management

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot, Notify};

use bslaunch_core::prelude::*;
use bslaunch_core::{OutputStream, ServerEvent, ServerInfo};

use crate::engine::ServerControl;
use crate::protocol::{parse_line, record_line, strip_ansi_codes, BsLine};

/// Readiness detection shared by the stdout and stderr readers.
///
/// Only the readers hold it, so the sender is dropped once both pipes close.
/// That tells the starter the process went away before it was ready.
struct ReadyTracker {
    info: ServerInfo,
    ready_tx: Option<oneshot::Sender<ServerInfo>>,
    last_error: Arc<Mutex<Option<String>>>,
}

impl ReadyTracker {
    fn observe(&mut self, line: &BsLine) {
        record_line(&mut self.info, line);

        if let BsLine::Error(message) = line {
            if let Ok(mut slot) = self.last_error.lock() {
                *slot = Some(message.clone());
            }
        }

        if line.is_ready_marker() {
            if let Some(tx) = self.ready_tx.take() {
                let _ = tx.send(self.info.clone());
            }
        }
    }
}

/// A running `browser-sync` child process.
///
/// The `Child` is owned by a dedicated wait task. This struct keeps a kill
/// channel for stopping it, an atomic flag for synchronous `is_running()`
/// checks and a [`Notify`] for awaiting the exit.
pub struct BrowsersyncProcess {
    pid: Option<u32>,
    /// Consumed on first `stop()`; dropping it also kills the child.
    kill_tx: Mutex<Option<oneshot::Sender<()>>>,
    exited: Arc<AtomicBool>,
    exit_notify: Arc<Notify>,
    exit_code: Arc<OnceLock<Option<i32>>>,
    last_error: Arc<Mutex<Option<String>>>,
}

impl BrowsersyncProcess {
    /// Spawn `program args...` with `cwd` as working directory.
    ///
    /// Returns the process and a receiver that resolves with the reported
    /// addresses once the server is ready. The receiver errors if the
    /// process closes its output first.
    pub fn spawn(
        program: &Path,
        args: &[String],
        cwd: &Path,
        event_tx: mpsc::Sender<ServerEvent>,
    ) -> Result<(Self, oneshot::Receiver<ServerInfo>)> {
        info!("Spawning Browsersync: {} {}", program.display(), args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::engine_not_found(program.display().to_string())
                } else {
                    Error::ProcessSpawn {
                        reason: e.to_string(),
                    }
                }
            })?;

        let pid = child.id();
        info!("Browsersync process started with PID: {:?}", pid);

        let (ready_tx, ready_rx) = oneshot::channel::<ServerInfo>();
        let last_error = Arc::new(Mutex::new(None));
        let tracker = Arc::new(Mutex::new(ReadyTracker {
            info: ServerInfo::default(),
            ready_tx: Some(ready_tx),
            last_error: Arc::clone(&last_error),
        }));

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::server_start("stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::server_start("stderr was not captured"))?;

        tokio::spawn(Self::output_reader(
            stdout,
            OutputStream::Stdout,
            event_tx.clone(),
            Arc::clone(&tracker),
        ));
        tokio::spawn(Self::output_reader(
            stderr,
            OutputStream::Stderr,
            event_tx.clone(),
            tracker,
        ));

        let exited = Arc::new(AtomicBool::new(false));
        let exit_notify = Arc::new(Notify::new());
        let exit_code = Arc::new(OnceLock::new());
        let (kill_tx, kill_rx) = oneshot::channel::<()>();

        tokio::spawn(Self::wait_for_exit(
            child,
            kill_rx,
            event_tx,
            Arc::clone(&exited),
            Arc::clone(&exit_notify),
            Arc::clone(&exit_code),
        ));

        let process = Self {
            pid,
            kill_tx: Mutex::new(Some(kill_tx)),
            exited,
            exit_notify,
            exit_code,
            last_error,
        };

        Ok((process, ready_rx))
    }

    /// Background task: owns `child`, waits for it to exit, emits `ServerEvent::Exited`.
    ///
    /// Ends either when the process exits on its own or when `kill_rx`
    /// fires (sent or dropped), in which case the child is killed first.
    async fn wait_for_exit(
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
        event_tx: mpsc::Sender<ServerEvent>,
        exited: Arc<AtomicBool>,
        exit_notify: Arc<Notify>,
        exit_code: Arc<OnceLock<Option<i32>>>,
    ) {
        let code: Option<i32> = tokio::select! {
            result = child.wait() => {
                match result {
                    Ok(status) => {
                        info!("Browsersync exited with status: {:?}", status);
                        status.code()
                    }
                    Err(e) => {
                        error!("Error waiting for Browsersync process: {}", e);
                        None
                    }
                }
            }
            _ = kill_rx => {
                info!("Stop requested, killing Browsersync process");
                if let Err(e) = child.kill().await {
                    error!("Failed to kill Browsersync process: {}", e);
                }
                match child.wait().await {
                    Ok(status) => status.code(),
                    Err(e) => {
                        error!("Error waiting after kill: {}", e);
                        None
                    }
                }
            }
        };

        let _ = exit_code.set(code);
        exited.store(true, Ordering::Release);
        exit_notify.notify_waiters();

        debug!("Sending ServerEvent::Exited {{ code: {:?} }}", code);
        let _ = event_tx.send(ServerEvent::Exited { code }).await;
    }

    /// Read lines from one pipe, feed readiness detection and forward them.
    async fn output_reader<R>(
        pipe: R,
        stream: OutputStream,
        tx: mpsc::Sender<ServerEvent>,
        tracker: Arc<Mutex<ReadyTracker>>,
    ) where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(pipe).lines();

        while let Ok(Some(raw)) = reader.next_line().await {
            let line = strip_ansi_codes(&raw);
            trace!("{:?}: {}", stream, line);

            if let Ok(mut tracker) = tracker.lock() {
                tracker.observe(&parse_line(&line));
            }

            if tx.send(ServerEvent::Output { stream, line }).await.is_err() {
                debug!("{:?} channel closed", stream);
                break;
            }
        }

        debug!("{:?} reader finished", stream);
    }

    /// Wait until the wait task has recorded the exit and return its code.
    pub async fn wait_exited(&self) -> Option<i32> {
        // Register before checking the flag so a notification between the
        // check and the await cannot be missed.
        let notified = self.exit_notify.notified();
        if !self.has_exited() {
            notified.await;
        }
        self.exit_code.get().copied().flatten()
    }

    /// Last error line printed by the engine, if any
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }

    pub fn id(&self) -> Option<u32> {
        self.pid
    }
}

impl ServerControl for BrowsersyncProcess {
    fn stop(&self) {
        if self.has_exited() {
            debug!("Browsersync already exited, nothing to stop");
            return;
        }

        if let Ok(mut kill_tx) = self.kill_tx.lock() {
            if let Some(tx) = kill_tx.take() {
                // The wait task may have finished in the meantime
                let _ = tx.send(());
            }
        }
    }

    fn is_running(&self) -> bool {
        !self.has_exited()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use tokio::time::timeout;

    fn sh() -> PathBuf {
        PathBuf::from("/bin/sh")
    }

    fn script(body: &str) -> Vec<String> {
        vec!["-c".to_string(), body.to_string()]
    }

    #[tokio::test]
    async fn test_ready_after_banner() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, mut rx) = mpsc::channel(64);
        let (process, ready) = BrowsersyncProcess::spawn(
            &sh(),
            &script(
                "echo '       Local: http://localhost:8000'; \
                 echo '[Browsersync] Serving files from: /srv'; \
                 sleep 5",
            ),
            dir.path(),
            tx,
        )
        .unwrap();

        let info = timeout(Duration::from_secs(5), ready)
            .await
            .expect("ready in time")
            .expect("ready before exit");
        assert_eq!(info.local.as_deref(), Some("http://localhost:8000"));
        assert_eq!(info.serving_from, Some(PathBuf::from("/srv")));
        assert!(process.is_running());

        process.stop();
        let code = timeout(Duration::from_secs(5), process.wait_exited())
            .await
            .expect("killed in time");
        assert_eq!(code, None);
        assert!(!process.is_running());

        let mut saw_exit = false;
        while let Ok(Some(event)) = timeout(Duration::from_secs(1), rx.recv()).await {
            if matches!(event, ServerEvent::Exited { .. }) {
                saw_exit = true;
                break;
            }
        }
        assert!(saw_exit);
    }

    #[tokio::test]
    async fn test_exit_before_ready() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::channel(64);
        let (process, ready) = BrowsersyncProcess::spawn(
            &sh(),
            &script("echo 'Error: listen EADDRINUSE' 1>&2; exit 3"),
            dir.path(),
            tx,
        )
        .unwrap();

        assert!(timeout(Duration::from_secs(5), ready).await.unwrap().is_err());
        assert_eq!(process.wait_exited().await, Some(3));
        assert_eq!(process.last_error().as_deref(), Some("listen EADDRINUSE"));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let (tx, _rx) = mpsc::channel(4);
        let result = BrowsersyncProcess::spawn(
            Path::new("/definitely/not/browser-sync"),
            &[],
            dir.path(),
            tx,
        );
        assert!(matches!(result, Err(Error::EngineNotFound { .. })));
    }
}
