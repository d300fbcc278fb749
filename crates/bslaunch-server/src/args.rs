//! Command-line arguments for `browser-sync start`

use bslaunch_core::{LaunchConfig, OpenMode};

/// Build the argument list for `browser-sync` from a resolved config.
///
/// `extra_args` from the settings file are appended last so they can
/// override anything generated here.
pub fn build_args(config: &LaunchConfig, extra_args: &[String]) -> Vec<String> {
    let base_dir = dunce::simplified(config.base_dir()).to_string_lossy().into_owned();

    let mut args = vec![
        "start".to_string(),
        "--server".to_string(),
        base_dir,
        "--files".to_string(),
        config.watch_glob.clone(),
        "--host".to_string(),
        config.host.clone(),
        "--port".to_string(),
        config.port.to_string(),
        "--index".to_string(),
        config.index.clone(),
        "--no-notify".to_string(),
    ];

    if config.directory_listing {
        args.push("--directory".to_string());
    }

    if config.https {
        args.push("--https".to_string());
    }

    match config.ui_port() {
        Some(ui_port) => {
            args.push("--ui-port".to_string());
            args.push(ui_port.to_string());
        }
        None => args.push("--no-ui".to_string()),
    }

    match config.open {
        OpenMode::External => {
            args.push("--open".to_string());
            args.push("external".to_string());
        }
        OpenMode::Disabled => args.push("--no-open".to_string()),
    }

    args.extend(extra_args.iter().cloned());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(https: bool, ui: bool, open: OpenMode) -> LaunchConfig {
        LaunchConfig::new(
            PathBuf::from("/home/u/site"),
            "**/*.html",
            "/home/u/site/**/*.html",
            "192.168.1.20",
            8000,
            https,
            ui,
            open,
        )
        .unwrap()
    }

    fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_core_options() {
        let args = build_args(&config(false, false, OpenMode::Disabled), &[]);
        assert_eq!(args[0], "start");
        assert_eq!(value_after(&args, "--server"), Some("/home/u/site"));
        assert_eq!(value_after(&args, "--files"), Some("/home/u/site/**/*.html"));
        assert_eq!(value_after(&args, "--host"), Some("192.168.1.20"));
        assert_eq!(value_after(&args, "--port"), Some("8000"));
        assert_eq!(value_after(&args, "--index"), Some("index.html"));
        assert!(args.contains(&"--directory".to_string()));
        assert!(!args.contains(&"--https".to_string()));
    }

    #[test]
    fn test_ui_flags() {
        let args = build_args(&config(false, true, OpenMode::Disabled), &[]);
        assert_eq!(value_after(&args, "--ui-port"), Some("8001"));
        assert!(!args.contains(&"--no-ui".to_string()));

        let args = build_args(&config(false, false, OpenMode::Disabled), &[]);
        assert!(args.contains(&"--no-ui".to_string()));
    }

    #[test]
    fn test_https_and_open() {
        let args = build_args(&config(true, false, OpenMode::External), &[]);
        assert!(args.contains(&"--https".to_string()));
        assert_eq!(value_after(&args, "--open"), Some("external"));
        assert!(!args.contains(&"--no-open".to_string()));
    }

    #[test]
    fn test_extra_args_appended_last() {
        let extra = vec!["--reload-delay".to_string(), "200".to_string()];
        let args = build_args(&config(false, false, OpenMode::Disabled), &extra);
        assert_eq!(&args[args.len() - 2..], extra.as_slice());
    }
}
