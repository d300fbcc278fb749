//! bslaunch-app - Launcher state machine and orchestration for Browsersync Launcher
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the launcher instance with its event bus and reactive view
//! state, configuration loading and persistence, and the Engine shared by
//! the TUI and headless runners.

pub mod actions;
pub mod binder;
pub mod builder;
pub mod config;
pub mod directory;
pub mod engine;
pub mod engine_event;
pub mod event_bus;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod launcher;
pub mod license;
pub mod message;
pub mod process;
pub mod session;
pub mod signals;
pub mod state;

// Re-export primary types
pub use binder::{ButtonView, LinkSlot, LinkView, PanelView};
pub use builder::{build, Defaults, RawFields};
pub use directory::{DirectorySelector, DroppedEntry};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use form::{FieldId, FormState};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use launcher::{Binding, LaunchDecision, LauncherInstance, UiBindings};
pub use message::Message;
pub use session::{ServerId, ServerSession};
pub use state::AppState;
