//! Core domain types for the launcher
//!
//! Defines:
//! - `LaunchConfig` - The resolved configuration handed to the server engine
//! - `OpenMode` - Browser auto-open behavior
//! - `LauncherPhase` - Running/stopped lifecycle
//! - `ServerInfo` - Addresses reported by the engine once it is listening
//! - `EnteredValues` - Text values as typed, before sanitizing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default port the development server listens on.
pub const DEFAULT_PORT: u16 = 8000;

/// Default watch pattern, relative to the base directory.
pub const DEFAULT_FILES: &str = "**/*.*";

/// Fallback bind/display host when no external interface is found.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Index document served for directory requests.
pub const DEFAULT_INDEX: &str = "index.html";

/// Whether the engine should open a browser tab once it is listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    #[default]
    Disabled,
    /// Open the external URL (`{host}:{port}`)
    External,
}

impl OpenMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, OpenMode::External)
    }
}

impl From<bool> for OpenMode {
    fn from(open: bool) -> Self {
        if open {
            OpenMode::External
        } else {
            OpenMode::Disabled
        }
    }
}

/// Two-state launcher lifecycle.
///
/// There is no intermediate "starting" state: a failed start leaves the
/// launcher in `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LauncherPhase {
    #[default]
    Stopped,
    Running,
}

impl fmt::Display for LauncherPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LauncherPhase::Stopped => write!(f, "stopped"),
            LauncherPhase::Running => write!(f, "running"),
        }
    }
}

/// Text values as the user typed them (or the defaults that replaced empty
/// fields), before HTML escaping.
///
/// This is what gets persisted, so restoring a record and building again
/// yields the same configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnteredValues {
    pub base_dir: String,
    pub files: String,
    pub host: String,
}

/// A fully resolved launch configuration.
///
/// Built once per launch click and never mutated afterwards. The watch glob
/// is kept in both forms: `files` is what the user typed (relative to
/// `base_dir`), `watch_glob` is the absolute pattern given to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchConfig {
    /// Absolute, normalized document root
    pub base_dir: PathBuf,

    /// Watch pattern as entered (or the default), relative to `base_dir`
    pub files: String,

    /// Absolute watch pattern anchored under `base_dir`
    pub watch_glob: String,

    /// Bind/display host
    pub host: String,

    /// Listening port
    pub port: u16,

    /// Serve over HTTPS
    pub https: bool,

    /// Companion UI port, always `port + 1` when present
    ui_port: Option<u16>,

    /// Browser auto-open behavior
    pub open: OpenMode,

    /// Serve directory listings when no index document exists
    pub directory_listing: bool,

    /// Index document name
    pub index: String,

    /// Unsanitized text values behind `base_dir`, `files` and `host`
    #[serde(skip)]
    pub entered: EnteredValues,
}

impl LaunchConfig {
    /// Create a configuration, deriving the UI port from `port`.
    ///
    /// Returns `None` when the UI is requested on a port that leaves no room
    /// for `port + 1`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        base_dir: PathBuf,
        files: impl Into<String>,
        watch_glob: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        https: bool,
        ui_enabled: bool,
        open: OpenMode,
    ) -> Option<Self> {
        let ui_port = if ui_enabled {
            Some(port.checked_add(1)?)
        } else {
            None
        };
        let files = files.into();
        let host = host.into();
        let entered = EnteredValues {
            base_dir: base_dir.to_string_lossy().into_owned(),
            files: files.clone(),
            host: host.clone(),
        };

        Some(Self {
            base_dir,
            files,
            watch_glob: watch_glob.into(),
            host,
            port,
            https,
            ui_port,
            open,
            directory_listing: true,
            index: DEFAULT_INDEX.to_string(),
            entered,
        })
    }

    /// Record the unsanitized values the config was built from
    pub fn with_entered(mut self, entered: EnteredValues) -> Self {
        self.entered = entered;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Port of the companion UI sub-server, if enabled
    pub fn ui_port(&self) -> Option<u16> {
        self.ui_port
    }

    pub fn ui_enabled(&self) -> bool {
        self.ui_port.is_some()
    }

    /// URL scheme derived from the HTTPS flag
    pub fn scheme(&self) -> &'static str {
        if self.https {
            "https"
        } else {
            "http"
        }
    }

    /// `{scheme}://localhost:{port}`
    pub fn local_url(&self) -> String {
        format!("{}://localhost:{}", self.scheme(), self.port)
    }

    /// `{scheme}://{host}:{port}`
    pub fn external_url(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.host, self.port)
    }

    /// `http://localhost:{ui_port}`, only when the UI is enabled.
    ///
    /// The UI sub-server never serves HTTPS.
    pub fn ui_url(&self) -> Option<String> {
        self.ui_port
            .map(|ui_port| format!("http://localhost:{}", ui_port))
    }
}

/// Addresses reported by the engine once it is listening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub local: Option<String>,
    pub external: Option<String>,
    pub ui: Option<String>,
    pub ui_external: Option<String>,
    pub serving_from: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(port: u16, https: bool, ui: bool) -> LaunchConfig {
        LaunchConfig::new(
            PathBuf::from("/home/u/site"),
            "**/*.html",
            "/home/u/site/**/*.html",
            "192.168.1.20",
            port,
            https,
            ui,
            OpenMode::Disabled,
        )
        .unwrap()
    }

    #[test]
    fn test_ui_port_is_port_plus_one() {
        let config = sample(8000, false, true);
        assert_eq!(config.ui_port(), Some(8001));
        assert!(config.ui_enabled());
    }

    #[test]
    fn test_ui_port_absent_when_disabled() {
        let config = sample(8000, false, false);
        assert_eq!(config.ui_port(), None);
        assert_eq!(config.ui_url(), None);
    }

    #[test]
    fn test_ui_port_overflow_is_rejected() {
        let config = LaunchConfig::new(
            PathBuf::from("/srv"),
            "**/*",
            "/srv/**/*",
            "0.0.0.0",
            u16::MAX,
            false,
            true,
            OpenMode::Disabled,
        );
        assert!(config.is_none());
    }

    #[test]
    fn test_urls_follow_scheme() {
        let config = sample(8000, false, true);
        assert_eq!(config.local_url(), "http://localhost:8000");
        assert_eq!(config.external_url(), "http://192.168.1.20:8000");
        assert_eq!(config.ui_url().as_deref(), Some("http://localhost:8001"));

        let config = sample(8443, true, true);
        assert_eq!(config.local_url(), "https://localhost:8443");
        assert_eq!(config.external_url(), "https://192.168.1.20:8443");
        // UI stays on plain HTTP
        assert_eq!(config.ui_url().as_deref(), Some("http://localhost:8444"));
    }

    #[test]
    fn test_entered_values_default_to_given_text() {
        let config = sample(8000, false, false);
        assert_eq!(config.entered.base_dir, "/home/u/site");
        assert_eq!(config.entered.files, "**/*.html");
        assert_eq!(config.entered.host, "192.168.1.20");

        let config = config.with_entered(EnteredValues {
            base_dir: "/home/u/site".into(),
            files: "a&b/*.html".into(),
            host: "h<1>".into(),
        });
        assert_eq!(config.entered.files, "a&b/*.html");
        assert_eq!(config.files, "**/*.html");
    }

    #[test]
    fn test_fixed_server_options() {
        let config = sample(8000, false, false);
        assert!(config.directory_listing);
        assert_eq!(config.index, "index.html");
    }

    #[test]
    fn test_open_mode_from_bool() {
        assert_eq!(OpenMode::from(true), OpenMode::External);
        assert_eq!(OpenMode::from(false), OpenMode::Disabled);
        assert!(OpenMode::External.is_enabled());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(LauncherPhase::Stopped.to_string(), "stopped");
        assert_eq!(LauncherPhase::Running.to_string(), "running");
        assert_eq!(LauncherPhase::default(), LauncherPhase::Stopped);
    }
}
