//! Headless mode runner - main event loop without TUI

use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use bslaunch_app::{Engine, EngineEvent, Message};
use bslaunch_core::prelude::Result;
use bslaunch_server::ServerEngine;

use super::{parse_command, HeadlessEvent};

/// Run in headless mode - NDJSON events on stdout, commands on stdin
pub async fn run_headless<E>(mut engine: Engine<E>) -> Result<()>
where
    E: ServerEngine + Send + Sync + 'static,
{
    info!("═══════════════════════════════════════════════════════");
    info!("Browsersync Launcher starting in HEADLESS mode");
    info!("Launcher id: {}", engine.state.launcher.id());
    info!("═══════════════════════════════════════════════════════");

    let mut events = engine.subscribe();

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        read_stdin_blocking(stdin_tx);
    });

    emit_ready(&engine);

    let result = headless_event_loop(&mut engine, &mut events).await;

    engine.shutdown();
    forward_events(&mut events);

    info!("Browsersync Launcher headless mode exiting");
    result
}

fn emit_ready<E>(engine: &Engine<E>) {
    let launcher = &engine.state.launcher;
    let placeholders = &launcher.form().placeholders;
    HeadlessEvent::launcher_ready(
        launcher.id(),
        &placeholders.base_dir,
        &placeholders.host,
        launcher.defaults().port,
    )
    .emit();
}

async fn headless_event_loop<E>(
    engine: &mut Engine<E>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()>
where
    E: ServerEngine + Send + Sync + 'static,
{
    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.msg_rx.recv().await {
            Some(msg) => {
                engine.process_message(msg);
                forward_events(events);
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }
    Ok(())
}

/// Write every event broadcast so far
fn forward_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(headless) = HeadlessEvent::from_engine(&event) {
                    headless.emit();
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless output skipped {} events", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

/// Read commands from stdin until EOF or `quit`
fn read_stdin_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(msg)) => {
                let quit = matches!(msg, Message::Quit);
                if msg_tx.blocking_send(msg).is_err() || quit {
                    info!("Stdin reader exiting");
                    return;
                }
            }
            Ok(None) => {}
            Err(reason) => {
                warn!("Stdin: {}", reason);
                HeadlessEvent::error(reason, false).emit();
            }
        }
    }

    // EOF ends the session like `quit`
    let _ = msg_tx.blocking_send(Message::Quit);
    info!("Stdin reader exiting");
}
