//! Configuration types for Browsersync Launcher
//!
//! Defines:
//! - `Settings` - Global application settings
//! - `SettingsOverrides` - Command-line values that win over the file

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use bslaunch_server::DEFAULT_COMMAND;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub engine: EngineSettings,

    #[serde(default)]
    pub launcher: LauncherSettings,

    #[serde(default)]
    pub license: LicenseSettings,
}

/// How the Browsersync executable is invoked
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineSettings {
    /// Executable name or path
    #[serde(default = "default_command")]
    pub command: String,

    /// Extra arguments appended to `browser-sync start`
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            command: default_command(),
            extra_args: Vec::new(),
        }
    }
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

/// Launcher instance settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LauncherSettings {
    /// Instance id; the persisted record is keyed by it
    #[serde(default = "default_launcher_id")]
    pub id: String,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            id: default_launcher_id(),
        }
    }
}

fn default_launcher_id() -> String {
    "main".to_string()
}

/// License viewer settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LicenseSettings {
    #[serde(default = "default_license_path")]
    pub path: PathBuf,
}

impl Default for LicenseSettings {
    fn default() -> Self {
        Self {
            path: default_license_path(),
        }
    }
}

fn default_license_path() -> PathBuf {
    PathBuf::from("LICENSE.md")
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub id: Option<String>,
    pub license_path: Option<PathBuf>,
    pub engine_command: Option<String>,
}

impl Settings {
    /// Apply command-line overrides on top of the loaded file
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(id) = overrides.id {
            self.launcher.id = id;
        }
        if let Some(path) = overrides.license_path {
            self.license.path = path;
        }
        if let Some(command) = overrides.engine_command {
            self.engine.command = command;
        }
        self
    }
}
