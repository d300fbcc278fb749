//! Base directory selection
//!
//! Two sources feed the base-dir field: a directory dialog owned by the
//! front-end, and dropped entries. Both are ignored while the server runs
//! and both end in a `BaseDirSelected` event.

use std::path::{Path, PathBuf};

use bslaunch_core::absolutize;
use url::Url;

/// Single-slot guard: at most one outstanding dialog request
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DialogGuard {
    held: bool,
}

impl DialogGuard {
    /// Take the slot. Returns `false` if a request is already outstanding.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            false
        } else {
            self.held = true;
            true
        }
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// One entry of a drop payload.
///
/// `type_descriptor` is a MIME-like type; directories have an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedEntry {
    pub path: PathBuf,
    pub type_descriptor: String,
}

impl DroppedEntry {
    pub fn new(path: impl Into<PathBuf>, type_descriptor: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            type_descriptor: type_descriptor.into(),
        }
    }

    /// Describe a path found on disk
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let type_descriptor = if path.is_dir() {
            String::new()
        } else {
            mime_for(&path).to_string()
        };
        Self {
            path,
            type_descriptor,
        }
    }

    pub fn looks_like_directory(&self) -> bool {
        self.type_descriptor.is_empty()
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "text/javascript",
        Some("json") => "application/json",
        Some("md") => "text/markdown",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Split a pasted drop payload into paths.
///
/// Terminals paste dropped items as quoted or backslash-escaped paths,
/// separated by newlines or spaces, sometimes as `file://` URLs.
pub fn parse_drop_payload(payload: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = payload.trim().chars();

    let flush = |current: &mut String, paths: &mut Vec<PathBuf>| {
        if !current.is_empty() {
            paths.push(payload_path(current));
            current.clear();
        }
    };

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'') | (None, '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() => flush(&mut current, &mut paths),
            (None, c) => current.push(c),
        }
    }
    flush(&mut current, &mut paths);

    paths
}

/// A single payload item: `file://` URLs are percent-decoded, anything else
/// is taken as a literal path
fn payload_path(raw: &str) -> PathBuf {
    if raw.starts_with("file:") {
        if let Some(path) = Url::parse(raw).ok().and_then(|url| url.to_file_path().ok()) {
            return path;
        }
    }
    PathBuf::from(raw)
}

/// Expand a leading `~` and make the path absolute
pub fn normalize_selection(path: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };
    absolutize(expanded)
}

/// Dialog guard plus drop-overlay feedback
#[derive(Debug, Default, Clone)]
pub struct DirectorySelector {
    guard: DialogGuard,
    overlay_active: bool,
}

impl DirectorySelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a dialog. Returns `true` if the request should be sent to
    /// the host, `false` when running or a request is outstanding.
    pub fn request_dialog(&mut self, running: bool) -> bool {
        if running {
            return false;
        }
        self.guard.try_acquire()
    }

    /// A dialog result arrived. Returns the path to select, or `None`
    /// while running. The guard is cleared either way.
    pub fn dialog_selected(&mut self, path: &Path, running: bool) -> Option<PathBuf> {
        self.guard.release();
        if running {
            return None;
        }
        Some(normalize_selection(path))
    }

    /// The dialog closed without a choice
    pub fn dialog_cancelled(&mut self) {
        self.guard.release();
    }

    pub fn dialog_outstanding(&self) -> bool {
        self.guard.is_held()
    }

    pub fn drag_enter(&mut self, running: bool) {
        if !running {
            self.overlay_active = true;
        }
    }

    pub fn drag_leave(&mut self, running: bool) {
        if !running {
            self.overlay_active = false;
        }
    }

    /// Handle a drop. Only the first entry counts and it must look like a
    /// directory.
    pub fn drop_entries(&mut self, entries: &[DroppedEntry], running: bool) -> Option<PathBuf> {
        if running {
            return None;
        }
        self.overlay_active = false;

        let first = entries.first()?;
        if !first.looks_like_directory() {
            return None;
        }
        Some(normalize_selection(&first.path))
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay_active
    }
}
