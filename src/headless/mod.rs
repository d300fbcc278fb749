//! Headless mode - NDJSON event output and stdin commands
//!
//! Runs the launcher without a terminal UI. Engine events are written to
//! stdout as newline-delimited JSON, one object per line with an `event`
//! field naming its type. Commands are read from stdin, one per line.
//!
//! # Example Output
//!
//! ```json
//! {"event":"launcher_ready","id":"main","base_dir":"/home/u","host":"192.168.1.20","port":8000,"timestamp":1704700001000}
//! {"event":"base_dir_selected","path":"/home/u/site","timestamp":1704700002000}
//! {"event":"started","base_dir":"/home/u/site","local_url":"http://localhost:8000",...}
//! ```
//!
//! # Commands
//!
//! `launch`, `reset`, `dialog`, `select <path>`, `cancel`, `drop <path>`,
//! `dragenter`, `dragleave`, `set <field> <value>`, `license`, `close`, `quit`.

pub mod runner;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use bslaunch_app::{Binding, DroppedEntry, EngineEvent, FieldId, Message, UiBindings};
use bslaunch_core::{LaunchConfig, OutputStream};

pub use runner::run_headless;

/// The launcher elements headless mode stands in for.
///
/// Each binding maps to a command (`select`/`dialog`, `launch`, `reset`,
/// `drop`, `dragenter`/`dragleave`, `license`, `close`) or, for the license
/// body, the `license_loaded` event.
pub fn ui_bindings() -> UiBindings {
    UiBindings::none()
        .with(Binding::BaseDirField)
        .with(Binding::LaunchButton)
        .with(Binding::ResetButton)
        .with(Binding::Droppable)
        .with(Binding::Overlay)
        .with(Binding::LicenseInfo)
        .with(Binding::LicenseLink)
        .with(Binding::LicenseBody)
        .with(Binding::LicenseClose)
}

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The launcher is constructed and accepting commands
    LauncherReady {
        id: String,
        base_dir: String,
        host: String,
        port: u16,
        timestamp: i64,
    },

    Started {
        base_dir: String,
        watch_glob: String,
        host: String,
        port: u16,
        ui_port: Option<u16>,
        https: bool,
        local_url: String,
        external_url: String,
        ui_url: Option<String>,
        timestamp: i64,
    },

    Stopped { timestamp: i64 },

    BaseDirSelected { path: String, timestamp: i64 },

    DialogRequested { timestamp: i64 },

    DialogCancelled { timestamp: i64 },

    ServerOutput {
        stream: String,
        line: String,
        timestamp: i64,
    },

    LicenseLoaded { length: usize, timestamp: i64 },

    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as one JSON line
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn launcher_ready(id: &str, base_dir: &str, host: &str, port: u16) -> Self {
        Self::LauncherReady {
            id: id.to_string(),
            base_dir: base_dir.to_string(),
            host: host.to_string(),
            port,
            timestamp: Self::now(),
        }
    }

    pub fn started(config: &LaunchConfig) -> Self {
        Self::Started {
            base_dir: config.base_dir.to_string_lossy().into_owned(),
            watch_glob: config.watch_glob.clone(),
            host: config.host.clone(),
            port: config.port,
            ui_port: config.ui_port(),
            https: config.https,
            local_url: config.local_url(),
            external_url: config.external_url(),
            ui_url: config.ui_url(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }

    /// Headless form of an engine event; `None` for events with no
    /// headless counterpart
    pub fn from_engine(event: &EngineEvent) -> Option<Self> {
        let timestamp = Self::now();
        let event = match event {
            EngineEvent::Started { config } => Self::started(config),
            EngineEvent::Stopped => Self::Stopped { timestamp },
            EngineEvent::BaseDirSelected { path } => Self::BaseDirSelected {
                path: path.to_string_lossy().into_owned(),
                timestamp,
            },
            EngineEvent::DialogRequested => Self::DialogRequested { timestamp },
            EngineEvent::DialogCancelled => Self::DialogCancelled { timestamp },
            EngineEvent::ServerOutput { stream, line } => Self::ServerOutput {
                stream: match stream {
                    OutputStream::Stdout => "stdout",
                    OutputStream::Stderr => "stderr",
                }
                .to_string(),
                line: line.clone(),
                timestamp,
            },
            EngineEvent::LicenseLoaded { text } => Self::LicenseLoaded {
                length: text.len(),
                timestamp,
            },
            EngineEvent::Error { message } => Self::error(message.clone(), false),
            EngineEvent::Shutdown => return None,
        };
        Some(event)
    }
}

/// Parse one stdin line into a message.
///
/// `Ok(None)` for blank lines; `Err` carries a message for the user.
pub fn parse_command(line: &str) -> Result<Option<Message>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let message = match command {
        "launch" | "l" => Message::LaunchClicked,
        "reset" => Message::ResetClicked,
        "dialog" => Message::DirectoryDialogRequested,
        "select" => {
            if rest.is_empty() {
                return Err("usage: select <path>".to_string());
            }
            Message::DirectorySelected {
                path: PathBuf::from(rest),
            }
        }
        "cancel" => Message::DirectorySelectionCancelled,
        "drop" => {
            if rest.is_empty() {
                return Err("usage: drop <path>".to_string());
            }
            Message::DirectoryDropped {
                entries: vec![DroppedEntry::from_path(rest)],
            }
        }
        "dragenter" => Message::DragEnter,
        "dragleave" => Message::DragLeave,
        "set" => parse_set(rest)?,
        "license" => Message::LicenseRequested,
        "close" => Message::LicenseClosed,
        "q" | "quit" => Message::Quit,
        other => return Err(format!("unknown command: {}", other)),
    };
    Ok(Some(message))
}

/// `set <field> <value>`; the value may be empty to clear a text field
fn parse_set(args: &str) -> Result<Message, String> {
    let (name, value) = match args.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (args, ""),
    };
    let field = FieldId::parse(name).ok_or_else(|| format!("unknown field: {}", name))?;

    if field.is_checkbox() {
        let checked = match value {
            "true" | "on" | "yes" | "1" => true,
            "false" | "off" | "no" | "0" => false,
            _ => return Err(format!("expected on/off for {}, got '{}'", name, value)),
        };
        Ok(Message::FieldChecked { field, checked })
    } else {
        Ok(Message::FieldEdited {
            field,
            value: value.to_string(),
        })
    }
}
