//! # bslaunch-core - Core Domain Types
//!
//! Foundation crate for Browsersync Launcher. Provides the launch
//! configuration value object, lifecycle events, error handling, logging
//! setup, input sanitizing and network identity lookup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing, if-addrs).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`LaunchConfig`] - Immutable, fully resolved server configuration
//! - [`OpenMode`] - Whether the engine opens a browser tab on start
//! - [`LauncherPhase`] - Two-state lifecycle (Stopped / Running)
//! - [`DEFAULT_PORT`], [`DEFAULT_FILES`], [`DEFAULT_HOST`] - Built-in defaults
//!
//! ### Events (`events`)
//! - [`LauncherEvent`] - Tagged union dispatched through the launcher event bus
//! - [`ServerEvent`] - Output and exit notifications from the engine process
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Input Handling (`sanitize`, `paths`)
//! - [`escape_html()`] - HTML-escape user text before it is used or displayed
//! - [`parse_port()`] - Integer-prefix port parsing
//! - [`absolutize()`] - Lexically resolve a path against the working directory
//!
//! ### Network (`network`)
//! - [`external_ipv4_addrs()`] - Non-loopback IPv4 addresses of this machine
//! - [`default_external_host()`] - First external address or `0.0.0.0`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use bslaunch_core::prelude::*;
//! ```

pub mod error;
pub mod events;
pub mod logging;
pub mod network;
pub mod paths;
pub mod prelude;
pub mod sanitize;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use events::{LauncherEvent, OutputStream, ServerEvent};
pub use network::{default_external_host, external_ipv4_addrs, first_external_ipv4};
pub use paths::{absolutize, join_glob, normalize_lexically};
pub use sanitize::{escape_html, parse_port};
pub use types::{
    EnteredValues, LaunchConfig, LauncherPhase, OpenMode, ServerInfo, DEFAULT_FILES, DEFAULT_HOST,
    DEFAULT_INDEX, DEFAULT_PORT,
};
