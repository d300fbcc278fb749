//! Form fields of the launcher panel
//!
//! Holds the editable values, their enablement and the placeholders that
//! show the defaults. The builder reads a [`RawFields`] snapshot of it.

use crate::builder::{Defaults, RawFields};
use crate::config::PersistedConfig;

/// Identifies a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    BaseDir,
    Files,
    Host,
    Port,
    Https,
    Ui,
    Open,
}

impl FieldId {
    /// All fields in display order
    pub const ALL: [FieldId; 7] = [
        FieldId::BaseDir,
        FieldId::Files,
        FieldId::Host,
        FieldId::Port,
        FieldId::Https,
        FieldId::Ui,
        FieldId::Open,
    ];

    pub fn is_checkbox(&self) -> bool {
        matches!(self, FieldId::Https | FieldId::Ui | FieldId::Open)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::BaseDir => "Base directory",
            FieldId::Files => "Watch files",
            FieldId::Host => "Host",
            FieldId::Port => "Port",
            FieldId::Https => "HTTPS",
            FieldId::Ui => "UI",
            FieldId::Open => "Open browser",
        }
    }

    /// Parse the short names used by headless commands
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "base_dir" | "basedir" | "dir" => Some(FieldId::BaseDir),
            "files" => Some(FieldId::Files),
            "host" => Some(FieldId::Host),
            "port" => Some(FieldId::Port),
            "https" => Some(FieldId::Https),
            "ui" => Some(FieldId::Ui),
            "open" => Some(FieldId::Open),
            _ => None,
        }
    }
}

/// Placeholders shown in empty text fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    pub base_dir: String,
    pub files: String,
    pub host: String,
    pub port: String,
}

impl From<&Defaults> for Placeholders {
    fn from(defaults: &Defaults) -> Self {
        Self {
            base_dir: defaults.base_dir.to_string_lossy().into_owned(),
            files: defaults.files.clone(),
            host: defaults.host.clone(),
            port: defaults.port.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub base_dir: String,
    pub files: String,
    pub host: String,
    pub port: String,
    pub https: bool,
    pub ui: bool,
    pub open: bool,

    /// All fields are disabled while the server runs
    pub fields_disabled: bool,
    pub reset_disabled: bool,

    pub placeholders: Placeholders,
}

impl FormState {
    pub fn new(placeholders: Placeholders) -> Self {
        Self {
            placeholders,
            ..Default::default()
        }
    }

    /// Snapshot for the builder
    pub fn raw(&self) -> RawFields {
        RawFields {
            base_dir: self.base_dir.clone(),
            files: self.files.clone(),
            host: self.host.clone(),
            port: self.port.clone(),
            https: self.https,
            ui: self.ui,
            open: self.open,
        }
    }

    /// Pre-fill from a persisted record: text fields take the literal
    /// stored value, booleans become checked state.
    pub fn restore(&mut self, record: &PersistedConfig) {
        self.base_dir = record.server.base_dir.clone();
        self.files = record.files.clone();
        self.host = record.host.clone();
        self.port = record.port.to_string();
        self.https = record.https;
        self.ui = record.ui;
        self.open = record.open;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.fields_disabled = !enabled;
        self.reset_disabled = !enabled;
    }

    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::BaseDir => Some(&self.base_dir),
            FieldId::Files => Some(&self.files),
            FieldId::Host => Some(&self.host),
            FieldId::Port => Some(&self.port),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::BaseDir => Some(&mut self.base_dir),
            FieldId::Files => Some(&mut self.files),
            FieldId::Host => Some(&mut self.host),
            FieldId::Port => Some(&mut self.port),
            _ => None,
        }
    }

    pub fn placeholder(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::BaseDir => Some(&self.placeholders.base_dir),
            FieldId::Files => Some(&self.placeholders.files),
            FieldId::Host => Some(&self.placeholders.host),
            FieldId::Port => Some(&self.placeholders.port),
            _ => None,
        }
    }

    pub fn checked(&self, field: FieldId) -> Option<bool> {
        match field {
            FieldId::Https => Some(self.https),
            FieldId::Ui => Some(self.ui),
            FieldId::Open => Some(self.open),
            _ => None,
        }
    }

    fn checked_mut(&mut self, field: FieldId) -> Option<&mut bool> {
        match field {
            FieldId::Https => Some(&mut self.https),
            FieldId::Ui => Some(&mut self.ui),
            FieldId::Open => Some(&mut self.open),
            _ => None,
        }
    }

    /// Replace a text field's value. Ignored while disabled.
    pub fn set_text(&mut self, field: FieldId, value: impl Into<String>) -> bool {
        if self.fields_disabled {
            return false;
        }
        match self.text_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Set a checkbox. Ignored while disabled.
    pub fn set_checked(&mut self, field: FieldId, checked: bool) -> bool {
        if self.fields_disabled {
            return false;
        }
        match self.checked_mut(field) {
            Some(slot) => {
                *slot = checked;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, field: FieldId) -> bool {
        match self.checked(field) {
            Some(current) => self.set_checked(field, !current),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersistedServer;

    #[test]
    fn test_placeholders_show_defaults() {
        let form = FormState::new(Placeholders::from(&Defaults::with("/home/u", "10.0.0.5")));
        assert_eq!(form.placeholder(FieldId::BaseDir), Some("/home/u"));
        assert_eq!(form.placeholder(FieldId::Files), Some("**/*.*"));
        assert_eq!(form.placeholder(FieldId::Host), Some("10.0.0.5"));
        assert_eq!(form.placeholder(FieldId::Port), Some("8000"));
        assert_eq!(form.placeholder(FieldId::Https), None);
    }

    #[test]
    fn test_restore_fills_literal_values() {
        let mut form = FormState::default();
        form.restore(&PersistedConfig {
            files: "**/*.html".into(),
            host: "192.168.1.20".into(),
            port: 8080,
            https: true,
            ui: false,
            open: true,
            server: PersistedServer {
                base_dir: "/home/u/site".into(),
            },
        });

        assert_eq!(form.base_dir, "/home/u/site");
        assert_eq!(form.files, "**/*.html");
        assert_eq!(form.port, "8080");
        assert!(form.https && !form.ui && form.open);
    }

    #[test]
    fn test_disabled_form_rejects_edits() {
        let mut form = FormState::default();
        assert!(form.set_text(FieldId::Host, "example.test"));

        form.set_enabled(false);
        assert!(form.reset_disabled);
        assert!(!form.set_text(FieldId::Host, "other"));
        assert!(!form.toggle(FieldId::Https));
        assert_eq!(form.host, "example.test");
        assert!(!form.https);
    }

    #[test]
    fn test_toggle_only_checkboxes() {
        let mut form = FormState::default();
        assert!(form.toggle(FieldId::Ui));
        assert!(form.ui);
        assert!(!form.toggle(FieldId::Port));
    }

    #[test]
    fn test_parse_field_names() {
        assert_eq!(FieldId::parse("port"), Some(FieldId::Port));
        assert_eq!(FieldId::parse("base_dir"), Some(FieldId::BaseDir));
        assert_eq!(FieldId::parse("nope"), None);
        assert!(FieldId::ALL.iter().filter(|f| f.is_checkbox()).count() == 3);
    }
}
