//! Launch configuration builder
//!
//! Turns the raw form values into a [`LaunchConfig`]. Building is total:
//! every missing or unusable value falls back to its default.

use std::path::PathBuf;

use bslaunch_core::{
    absolutize, default_external_host, escape_html, join_glob, parse_port, EnteredValues,
    LaunchConfig, OpenMode, DEFAULT_FILES, DEFAULT_PORT,
};

/// Raw values as they sit in the form when launch is clicked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub base_dir: String,
    pub files: String,
    pub host: String,
    pub port: String,
    pub https: bool,
    pub ui: bool,
    pub open: bool,
}

/// Values used when a field is empty or unusable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub base_dir: PathBuf,
    pub files: String,
    pub host: String,
    pub port: u16,
    pub https: bool,
    pub ui: bool,
    pub open: bool,
}

impl Defaults {
    /// Defaults for this machine: the home directory and the first external
    /// IPv4 address.
    pub fn detect() -> Self {
        let base_dir = dirs::home_dir().unwrap_or_else(|| absolutize("."));
        Self::with(base_dir, default_external_host())
    }

    pub fn with(base_dir: impl Into<PathBuf>, host: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            files: DEFAULT_FILES.to_string(),
            host: host.into(),
            port: DEFAULT_PORT,
            https: false,
            ui: false,
            open: false,
        }
    }
}

/// `sanitized(raw) || default`
fn text_or(raw: &str, default: &str) -> String {
    let sanitized = escape_html(raw);
    if sanitized.is_empty() {
        default.to_string()
    } else {
        sanitized
    }
}

/// `raw || default`, unescaped
fn entered_or(raw: &str, default: &str) -> String {
    if raw.is_empty() {
        default.to_string()
    } else {
        raw.to_string()
    }
}

/// Build the effective launch configuration.
///
/// Checkboxes are OR-ed with their defaults, so an unchecked box never
/// forces `false` over a `true` default.
pub fn build(raw: &RawFields, defaults: &Defaults) -> LaunchConfig {
    let (base_dir, entered_base_dir) = if raw.base_dir.is_empty() {
        let base_dir = absolutize(&defaults.base_dir);
        let entered = base_dir.to_string_lossy().into_owned();
        (base_dir, entered)
    } else {
        (
            absolutize(escape_html(&raw.base_dir)),
            absolutize(&raw.base_dir).to_string_lossy().into_owned(),
        )
    };
    let entered = EnteredValues {
        base_dir: entered_base_dir,
        files: entered_or(&raw.files, &defaults.files),
        host: entered_or(&raw.host, &defaults.host),
    };

    let files = text_or(&raw.files, &defaults.files);
    let watch_glob = join_glob(&base_dir, &files);
    let host = text_or(&raw.host, &defaults.host);
    let https = raw.https || defaults.https;
    let ui = raw.ui || defaults.ui;
    let open = OpenMode::from(raw.open || defaults.open);

    let requested = parse_port(&escape_html(&raw.port));
    let candidates = requested
        .into_iter()
        .chain([defaults.port, DEFAULT_PORT]);

    for port in candidates {
        if let Some(config) = LaunchConfig::new(
            base_dir.clone(),
            files.clone(),
            watch_glob.clone(),
            host.clone(),
            port,
            https,
            ui,
            open,
        ) {
            return config.with_entered(entered);
        }
    }

    unreachable!("DEFAULT_PORT always leaves room for the UI port")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Defaults {
        Defaults::with("/home/u", "192.168.1.20")
    }

    fn raw() -> RawFields {
        RawFields::default()
    }

    #[test]
    fn test_reference_scenario() {
        let config = build(
            &RawFields {
                base_dir: "/home/u/site".into(),
                files: "**/*.html".into(),
                ui: true,
                ..raw()
            },
            &defaults(),
        );

        assert_eq!(config.base_dir, PathBuf::from("/home/u/site"));
        assert_eq!(config.files, "**/*.html");
        assert_eq!(config.watch_glob, "/home/u/site/**/*.html");
        assert_eq!(config.host, "192.168.1.20");
        assert_eq!(config.port, 8000);
        assert_eq!(config.ui_port(), Some(8001));
        assert!(!config.https);
        assert_eq!(config.open, OpenMode::Disabled);
    }

    #[test]
    fn test_all_empty_uses_defaults() {
        let config = build(&raw(), &defaults());

        assert_eq!(config.base_dir, PathBuf::from("/home/u"));
        assert_eq!(config.files, "**/*.*");
        assert_eq!(config.watch_glob, "/home/u/**/*.*");
        assert_eq!(config.port, 8000);
        assert_eq!(config.ui_port(), None);
    }

    #[test]
    fn test_invalid_ports_fall_back() {
        for port in ["", "0", "-1", "abc", "65536", "99999"] {
            let config = build(
                &RawFields {
                    port: port.into(),
                    ..raw()
                },
                &defaults(),
            );
            assert_eq!(config.port, 8000, "port input {:?}", port);
        }
    }

    #[test]
    fn test_port_integer_prefix() {
        let config = build(
            &RawFields {
                port: "3000abc".into(),
                ..raw()
            },
            &defaults(),
        );
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_top_port_without_room_for_ui() {
        let with_ui = build(
            &RawFields {
                port: "65535".into(),
                ui: true,
                ..raw()
            },
            &defaults(),
        );
        assert_eq!(with_ui.port, 8000);
        assert_eq!(with_ui.ui_port(), Some(8001));

        let without_ui = build(
            &RawFields {
                port: "65535".into(),
                ..raw()
            },
            &defaults(),
        );
        assert_eq!(without_ui.port, 65535);
    }

    #[test]
    fn test_checkbox_or_fallback() {
        let mut defaults = defaults();
        defaults.https = true;
        defaults.open = true;

        let config = build(&raw(), &defaults);
        assert!(config.https);
        assert_eq!(config.open, OpenMode::External);

        let config = build(
            &RawFields {
                ui: true,
                ..raw()
            },
            &defaults,
        );
        assert!(config.ui_enabled());
    }

    #[test]
    fn test_text_fields_are_escaped() {
        let config = build(
            &RawFields {
                host: "<b>host</b>".into(),
                files: "a&b/*.html".into(),
                ..raw()
            },
            &defaults(),
        );
        assert_eq!(config.host, "&lt;b&gt;host&lt;/b&gt;");
        assert_eq!(config.files, "a&amp;b/*.html");
        assert_eq!(config.entered.host, "<b>host</b>");
        assert_eq!(config.entered.files, "a&b/*.html");
    }

    #[test]
    fn test_entered_values_fall_back_to_defaults() {
        let config = build(&raw(), &defaults());
        assert_eq!(config.entered.base_dir, "/home/u");
        assert_eq!(config.entered.files, "**/*.*");
        assert_eq!(config.entered.host, "192.168.1.20");

        let config = build(
            &RawFields {
                base_dir: "/srv/./a&b".into(),
                ..raw()
            },
            &defaults(),
        );
        assert_eq!(config.base_dir, PathBuf::from("/srv/a&amp;b"));
        assert_eq!(config.entered.base_dir, "/srv/a&b");
    }

    #[test]
    fn test_base_dir_is_normalized() {
        let config = build(
            &RawFields {
                base_dir: "/home/u/./site/../www/".into(),
                files: "../shared/*.css".into(),
                ..raw()
            },
            &defaults(),
        );
        assert_eq!(config.base_dir, PathBuf::from("/home/u/www"));
        assert_eq!(config.watch_glob, "/home/u/shared/*.css");
    }

    #[test]
    fn test_glob_reanchors_under_new_base() {
        let first = build(
            &RawFields {
                base_dir: "/a".into(),
                files: "**/*.js".into(),
                ..raw()
            },
            &defaults(),
        );
        let second = build(
            &RawFields {
                base_dir: "/b".into(),
                files: first.files.clone(),
                ..raw()
            },
            &defaults(),
        );
        assert_eq!(second.watch_glob, "/b/**/*.js");
    }
}
