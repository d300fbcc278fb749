//! Browsersync Launcher Library
//!
//! A terminal control panel for starting and stopping a Browsersync
//! development server. The launcher logic lives in the workspace crates;
//! this crate adds the headless front-end and the binary.

pub mod headless;

pub use headless::run_headless;
