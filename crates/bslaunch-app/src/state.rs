//! Application state (Model in TEA pattern)

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use bslaunch_core::OutputStream;

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::form::FieldId;
use crate::launcher::LauncherInstance;
use crate::license::LicenseViewer;

/// Server output lines kept for display
pub const MAX_OUTPUT_LINES: usize = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Focusable element of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    Launch,
    Reset,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FieldId::BaseDir)
    }
}

impl Focus {
    fn order() -> Vec<Focus> {
        FieldId::ALL
            .into_iter()
            .map(Focus::Field)
            .chain([Focus::Launch, Focus::Reset])
            .collect()
    }

    pub fn next(self) -> Self {
        let order = Self::order();
        let idx = order.iter().position(|f| *f == self).unwrap_or(0);
        order[(idx + 1) % order.len()]
    }

    pub fn prev(self) -> Self {
        let order = Self::order();
        let idx = order.iter().position(|f| *f == self).unwrap_or(0);
        order[(idx + order.len() - 1) % order.len()]
    }

    pub fn field(self) -> Option<FieldId> {
        match self {
            Focus::Field(field) => Some(field),
            _ => None,
        }
    }
}

/// The directory dialog as the terminal front-end shows it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPrompt {
    pub input: String,
    pub error: Option<String>,
}

impl DirectoryPrompt {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            input: initial.into(),
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub at: DateTime<Local>,
    pub stream: OutputStream,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    pub at: DateTime<Local>,
}

pub struct AppState {
    pub launcher: LauncherInstance,
    pub settings: Settings,
    pub phase: AppPhase,
    pub focus: Focus,

    /// Open directory dialog, if any
    pub prompt: Option<DirectoryPrompt>,

    pub license: LicenseViewer,
    pub output: VecDeque<OutputLine>,
    pub status: Option<StatusMessage>,

    outbox: Vec<EngineEvent>,
}

impl AppState {
    pub fn new(launcher: LauncherInstance, settings: Settings) -> Self {
        Self {
            launcher,
            settings,
            phase: AppPhase::default(),
            focus: Focus::default(),
            prompt: None,
            license: LicenseViewer::new(),
            output: VecDeque::new(),
            status: None,
            outbox: Vec::new(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
            at: Local::now(),
        });
    }

    /// Show an error in the status line and report it to subscribers
    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.set_status(StatusLevel::Error, message.clone());
        self.emit(EngineEvent::Error { message });
    }

    pub fn push_output(&mut self, stream: OutputStream, text: String) {
        if self.output.len() >= MAX_OUTPUT_LINES {
            self.output.pop_front();
        }
        self.output.push_back(OutputLine {
            at: Local::now(),
            stream,
            text,
        });
    }

    /// Queue an event, after any launcher events emitted before it
    pub fn emit(&mut self, event: EngineEvent) {
        self.collect_launcher_events();
        self.outbox.push(event);
    }

    /// Drain queued events in emission order
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        self.collect_launcher_events();
        std::mem::take(&mut self.outbox)
    }

    fn collect_launcher_events(&mut self) {
        let events = self.launcher.take_emitted();
        self.outbox.extend(events.into_iter().map(EngineEvent::from));
    }
}
