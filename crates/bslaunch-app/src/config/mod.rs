//! Configuration for Browsersync Launcher
//!
//! Supports:
//! - `<config_dir>/browsersync-launcher/config.toml` - Global settings
//! - `<data_local_dir>/browsersync-launcher/records/` - Last-used launch
//!   configuration, one record per launcher id

pub mod settings;
pub mod store;
pub mod types;

pub use settings::{
    default_config_dir, default_config_path, default_records_dir, init_config_dir, load_settings,
    CONFIG_FILENAME,
};
pub use store::{
    ConfigStore, FileConfigStore, MemoryConfigStore, PersistedConfig, PersistedServer,
};
#[cfg(test)]
pub use store::MockConfigStore;
pub use types::*;
