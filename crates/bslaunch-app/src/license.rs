//! License viewer state
//!
//! The text is read once and cached. A failed read shows a fallback body and
//! the next request tries again.

use std::path::Path;

use bslaunch_core::prelude::*;

pub const LICENSE_FALLBACK: &str = "LICENSE.md is not loaded.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseViewer {
    text: Option<String>,
    failed: bool,
    open: bool,
    pub scroll: u16,
}

impl LicenseViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the panel. Returns `true` when the text still has to be read.
    pub fn request(&mut self) -> bool {
        self.open = true;
        self.scroll = 0;
        self.text.is_none()
    }

    pub fn loaded(&mut self, text: String) {
        self.text = Some(text);
        self.failed = false;
    }

    pub fn load_failed(&mut self) {
        self.failed = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loaded(&self) -> bool {
        self.text.is_some()
    }

    /// Text to display; empty while a read is in flight
    pub fn body(&self) -> &str {
        match (&self.text, self.failed) {
            (Some(text), _) => text,
            (None, true) => LICENSE_FALLBACK,
            (None, false) => "",
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Read the license file
pub async fn read_license(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::license_read(path, e.to_string()))
}
