//! Engine - shared orchestration state for the TUI and headless runners
//!
//! Owns the TEA state, the message channel, the shutdown signal, the server
//! engine and the broadcast channel external consumers subscribe to.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};

use bslaunch_core::prelude::*;
use bslaunch_server::{BrowsersyncEngine, ServerEngine};

use crate::builder::Defaults;
use crate::config::{default_records_dir, ConfigStore, FileConfigStore, Settings};
use crate::engine_event::EngineEvent;
use crate::launcher::{LauncherInstance, UiBindings};
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the message and event channels
const CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for Browsersync Launcher.
///
/// Encapsulates everything the front-ends share:
/// - TEA state management
/// - Message channel
/// - Shutdown signaling
/// - The server engine used for starts
/// - Event broadcasting for external consumers
pub struct Engine<E = BrowsersyncEngine> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, stdin, terminal).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Send `true` to initiate shutdown.
    pub shutdown_tx: watch::Sender<bool>,

    pub shutdown_rx: watch::Receiver<bool>,

    server_engine: Arc<E>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<BrowsersyncEngine> {
    /// Create the engine used by the binary.
    ///
    /// Records live in the platform data directory; defaults come from this
    /// machine; the signal handler is installed. `bindings` are the elements
    /// the chosen front-end renders.
    pub fn new(settings: Settings, bindings: &UiBindings) -> Result<Self> {
        let store = FileConfigStore::new(default_records_dir());
        let server_engine = BrowsersyncEngine::new(
            settings.engine.command.clone(),
            settings.engine.extra_args.clone(),
        );

        let engine = Self::with_parts(
            settings,
            Box::new(store),
            Defaults::detect(),
            bindings,
            server_engine,
        )?;

        signals::spawn_signal_handler(engine.msg_tx.clone());
        Ok(engine)
    }
}

impl<E> Engine<E>
where
    E: ServerEngine + Send + Sync + 'static,
{
    /// Create an engine from explicit parts.
    ///
    /// Fails when the launcher cannot be constructed (a missing UI binding).
    pub fn with_parts(
        settings: Settings,
        store: Box<dyn ConfigStore>,
        defaults: Defaults,
        bindings: &UiBindings,
        server_engine: E,
    ) -> Result<Self> {
        let launcher =
            LauncherInstance::new(settings.launcher.id.clone(), store, defaults, bindings)?;
        let state = AppState::new(launcher, settings);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        Ok(Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            server_engine: Arc::new(server_engine),
            event_tx,
        })
    }

    /// Subscribe to engine events.
    ///
    /// Events are sent after each message processing cycle. A subscriber
    /// that falls behind loses the oldest events (`RecvError::Lagged`).
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle, then
    /// broadcast the events it produced.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.msg_tx, &self.server_engine);
        self.flush_events();
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop the server and signal background tasks to finish.
    pub fn shutdown(&mut self) {
        self.state.launcher.shutdown();
        self.flush_events();
        self.emit(EngineEvent::Shutdown);

        let _ = self.shutdown_tx.send(true);
        info!("Engine shut down");
    }

    fn flush_events(&mut self) {
        for event in self.state.take_events() {
            trace!("Engine event: {}", event.event_type());
            self.emit(event);
        }
    }

    /// send() fails only when nobody is subscribed, which is fine.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
