//! # bslaunch-server - Browsersync Process Management
//!
//! Starts and stops the `browser-sync` CLI on behalf of the launcher and
//! recovers readiness and access URLs from its console output.
//!
//! Depends on [`bslaunch_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Engine Seam
//! - [`ServerEngine`] - Async trait: start a server for a [`bslaunch_core::LaunchConfig`]
//! - [`ServerHandle`] - Cloneable stop/liveness handle for a started server
//! - [`BrowsersyncEngine`] - Engine backed by the `browser-sync` executable
//!
//! ### Process Management
//! - [`BrowsersyncProcess`] - Child process with output readers and a wait task
//! - [`build_args()`] - Map a launch config to `browser-sync start` arguments
//!
//! ### Output Parsing
//! - [`parse_line()`] - Classify a line of Browsersync output
//! - [`strip_ansi_codes()`] - Remove terminal colour codes

pub mod args;
pub mod engine;
pub mod process;
pub mod protocol;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use args::build_args;
pub use engine::{
    BrowsersyncEngine, LocalServerEngine, ServerControl, ServerEngine, ServerHandle,
    DEFAULT_COMMAND,
};
pub use process::BrowsersyncProcess;
pub use protocol::{parse_line, record_line, strip_ansi_codes, BsLine, UrlKind};
