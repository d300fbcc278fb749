//! Settings parser for config.toml

use super::types::Settings;
use bslaunch_core::logging::APP_DIR_NAME;
use bslaunch_core::prelude::*;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.toml";
const RECORDS_DIR: &str = "records";

/// `<config_dir>/browsersync-launcher`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// `<config_dir>/browsersync-launcher/config.toml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILENAME)
}

/// `<data_local_dir>/browsersync-launcher/records`
pub fn default_records_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(RECORDS_DIR)
}

/// Load settings from `config_path`
///
/// Returns default settings if the file doesn't exist or is invalid.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create the config directory with a commented default config.toml
///
/// An existing config file is left untouched.
pub fn init_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# Browsersync Launcher Configuration

[engine]
command = "browser-sync"   # Executable name or absolute path
extra_args = []            # Appended to `browser-sync start`

[launcher]
id = "main"                # Last-used settings are remembered per id

[license]
path = "LICENSE.md"        # Shown by the license viewer (F1)
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Wrote default config to {:?}", config_path);
    }

    Ok(())
}
