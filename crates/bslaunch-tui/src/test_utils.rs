//! Test utilities for TUI rendering verification
//!
//! Widgets and the full view are rendered into ratatui's TestBackend and
//! asserted on as plain text.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};

use bslaunch_app::config::{MemoryConfigStore, Settings};
use bslaunch_app::handler::update;
use bslaunch_app::{AppState, Defaults, LauncherInstance, Message, UpdateAction};
use bslaunch_core::ServerInfo;
use bslaunch_server::{ServerControl, ServerHandle};

pub const TEST_WIDTH: u16 = 100;
pub const TEST_HEIGHT: u16 = 30;

pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows joined with newlines
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, y)].symbol());
        }
        result.push('\n');
    }
    result
}

/// Launcher state backed by an in-memory store
pub fn test_state() -> AppState {
    let launcher = LauncherInstance::new(
        "main",
        Box::new(MemoryConfigStore::new()),
        Defaults::with("/home/u", "192.168.1.20"),
        &crate::ui_bindings(),
    )
    .expect("launcher");
    AppState::new(launcher, Settings::default())
}

struct RunningFlag(AtomicBool);

impl ServerControl for RunningFlag {
    fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Launcher state with a started server, driven through the update function
pub fn running_state(configure: impl FnOnce(&mut AppState)) -> AppState {
    let mut state = test_state();
    configure(&mut state);

    let result = update(&mut state, Message::LaunchClicked);
    let Some(UpdateAction::StartServer { server_id, config }) = result.action else {
        panic!("expected StartServer");
    };
    let handle = ServerHandle::new(
        Some(4242),
        ServerInfo::default(),
        Arc::new(RunningFlag(AtomicBool::new(true))),
    );
    update(
        &mut state,
        Message::ServerStarted {
            server_id,
            config,
            handle,
        },
    );
    assert!(state.launcher.is_active());
    state
}
