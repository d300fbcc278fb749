//! Browsersync console output parsing
//!
//! The `browser-sync` CLI has no machine-readable mode, so readiness and the
//! access URLs are recovered from its human-readable banner:
//!
//! ```text
//! [Browsersync] Access URLs:
//!  --------------------------------------
//!        Local: http://localhost:8000
//!     External: http://192.168.1.20:8000
//!  --------------------------------------
//!           UI: http://localhost:8001
//!  UI External: http://192.168.1.20:8001
//!  --------------------------------------
//! [Browsersync] Serving files from: /home/u/site
//! [Browsersync] Watching files...
//! ```

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use bslaunch_core::ServerInfo;

/// CSI, OSC and simple escape sequences emitted for terminal colouring
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[A-Za-z]               # CSI sequences
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)  # OSC sequences
        | \x1b[A-Za-z]                       # Simple escapes
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// `Local: http://localhost:8000` and friends inside the banner
static ACCESS_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(Local|External|UI External|UI|Tunnel):\s+(\S+)\s*$")
        .expect("Access URL regex pattern is valid")
});

static SERVING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[Browsersync\]\s+Serving files from:\s+(.+?)\s*$")
        .expect("Serving regex pattern is valid")
});

static WATCHING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[Browsersync\]\s+Watching files").expect("Watching regex pattern is valid")
});

static RELOAD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[Browsersync\]\s+(?:Reloading Browsers|File event)")
        .expect("Reload regex pattern is valid")
});

static ERROR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\[Browsersync\]\s*)?error\b:?\s*(.*)$")
        .expect("Error regex pattern is valid")
});

/// Which banner row an access URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Local,
    External,
    Ui,
    UiExternal,
    Tunnel,
}

impl UrlKind {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Local" => Some(UrlKind::Local),
            "External" => Some(UrlKind::External),
            "UI" => Some(UrlKind::Ui),
            "UI External" => Some(UrlKind::UiExternal),
            "Tunnel" => Some(UrlKind::Tunnel),
            _ => None,
        }
    }
}

/// One classified line of Browsersync output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BsLine {
    AccessUrl { kind: UrlKind, url: String },
    ServingFrom(PathBuf),
    Watching,
    Reload,
    Error(String),
    Other(String),
}

impl BsLine {
    /// The server is accepting connections once it reports what it serves
    /// (or, without a static server, what it watches).
    pub fn is_ready_marker(&self) -> bool {
        matches!(self, BsLine::ServingFrom(_) | BsLine::Watching)
    }
}

/// Strip ANSI escape sequences from a line of output
pub fn strip_ansi_codes(input: &str) -> String {
    ANSI_ESCAPE_PATTERN.replace_all(input, "").into_owned()
}

/// Classify a line of output. ANSI codes must already be stripped.
pub fn parse_line(line: &str) -> BsLine {
    if let Some(caps) = ACCESS_URL_PATTERN.captures(line) {
        if let Some(kind) = UrlKind::from_label(&caps[1]) {
            return BsLine::AccessUrl {
                kind,
                url: caps[2].to_string(),
            };
        }
    }

    if let Some(caps) = SERVING_PATTERN.captures(line) {
        return BsLine::ServingFrom(PathBuf::from(&caps[1]));
    }

    if WATCHING_PATTERN.is_match(line) {
        return BsLine::Watching;
    }

    if RELOAD_PATTERN.is_match(line) {
        return BsLine::Reload;
    }

    if let Some(caps) = ERROR_PATTERN.captures(line) {
        let message = caps[1].trim();
        let message = if message.is_empty() { line.trim() } else { message };
        return BsLine::Error(message.to_string());
    }

    BsLine::Other(line.to_string())
}

/// Fold a classified line into the addresses reported so far
pub fn record_line(info: &mut ServerInfo, line: &BsLine) {
    match line {
        BsLine::AccessUrl { kind, url } => {
            let slot = match kind {
                UrlKind::Local => &mut info.local,
                UrlKind::External => &mut info.external,
                UrlKind::Ui => &mut info.ui,
                UrlKind::UiExternal => &mut info.ui_external,
                UrlKind::Tunnel => return,
            };
            *slot = Some(url.clone());
        }
        BsLine::ServingFrom(path) => info.serving_from = Some(path.clone()),
        _ => {}
    }
}
