//! Persistence of the last-used launch configuration
//!
//! One record per launcher id. A record is written on every successful start,
//! removed by reset and read once when the launcher is constructed.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use bslaunch_core::prelude::*;
use bslaunch_core::LaunchConfig;

const LOCK_FILENAME: &str = ".records.lock";

/// `server` section of a persisted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedServer {
    pub base_dir: String,
}

/// Serializable projection of a [`LaunchConfig`].
///
/// `files` is the pattern relative to the base directory, never the
/// absolute glob, so a restored record re-anchors under whatever base
/// directory is chosen next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConfig {
    pub files: String,
    pub host: String,
    pub port: u16,
    pub https: bool,
    pub ui: bool,
    pub open: bool,
    pub server: PersistedServer,
}

/// Text fields are saved as entered, before escaping, so restoring a record
/// into the form and building again gives back the same config.
impl From<&LaunchConfig> for PersistedConfig {
    fn from(config: &LaunchConfig) -> Self {
        Self {
            files: config.entered.files.clone(),
            host: config.entered.host.clone(),
            port: config.port,
            https: config.https,
            ui: config.ui_enabled(),
            open: config.open.is_enabled(),
            server: PersistedServer {
                base_dir: config.entered.base_dir.clone(),
            },
        }
    }
}

/// Durable per-id storage of [`PersistedConfig`] records
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore: Send {
    /// Overwrite the record for `id`
    fn save(&mut self, id: &str, record: &PersistedConfig) -> Result<()>;

    /// Read the record for `id`, if one exists
    fn load(&self, id: &str) -> Result<Option<PersistedConfig>>;

    /// Remove the record for `id`. Removing a missing record is not an error.
    fn clear(&mut self, id: &str) -> Result<()>;
}

/// One TOML file per id inside a records directory.
///
/// Writes go to a temp file that is renamed over the record while holding an
/// exclusive lock on the directory's lock file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    dir: PathBuf,
}

impl FileConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<id>_config.toml`, with characters unsafe in file names replaced
    pub fn record_path(&self, id: &str) -> PathBuf {
        let safe: String = id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}_config.toml", safe))
    }

    fn lock(&self) -> Result<std::fs::File> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::store(format!("Failed to create records dir: {}", e)))?;

        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.dir.join(LOCK_FILENAME))
            .map_err(|e| Error::store(format!("Failed to open lock file: {}", e)))?;

        // Released when the file is dropped
        file.lock_exclusive()
            .map_err(|e| Error::store(format!("Failed to lock records: {}", e)))?;
        Ok(file)
    }
}

impl ConfigStore for FileConfigStore {
    fn save(&mut self, id: &str, record: &PersistedConfig) -> Result<()> {
        let _lock = self.lock()?;

        let content = toml::to_string_pretty(record)
            .map_err(|e| Error::store(format!("Failed to serialize record: {}", e)))?;

        let path = self.record_path(id);
        let temp_path = path.with_extension("toml.tmp");

        let mut temp = std::fs::File::create(&temp_path)
            .map_err(|e| Error::store(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.flush())
            .map_err(|e| Error::store(format!("Failed to write temp file: {}", e)))?;
        drop(temp);

        std::fs::rename(&temp_path, &path)
            .map_err(|e| Error::store(format!("Failed to rename temp file: {}", e)))?;

        debug!("Saved launch record for '{}' to {:?}", id, path);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<PersistedConfig>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::store(format!("Failed to read {:?}: {}", path, e)))?;
        let record = toml::from_str(&content)
            .map_err(|e| Error::store(format!("Failed to parse {:?}: {}", path, e)))?;
        Ok(Some(record))
    }

    fn clear(&mut self, id: &str) -> Result<()> {
        let _lock = self.lock()?;
        let path = self.record_path(id);

        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Cleared launch record for '{}'", id);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::store(format!("Failed to remove {:?}: {}", path, e))),
        }
    }
}

/// In-memory store; clones share the same records
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    records: Arc<Mutex<HashMap<String, PersistedConfig>>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the record for `id`
    pub fn get(&self, id: &str) -> Option<PersistedConfig> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(id).cloned())
    }

    fn records(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, PersistedConfig>>> {
        self.records
            .lock()
            .map_err(|_| Error::store("record map poisoned"))
    }
}

impl ConfigStore for MemoryConfigStore {
    fn save(&mut self, id: &str, record: &PersistedConfig) -> Result<()> {
        self.records()?.insert(id.to_string(), record.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<PersistedConfig>> {
        Ok(self.records()?.get(id).cloned())
    }

    fn clear(&mut self, id: &str) -> Result<()> {
        self.records()?.remove(id);
        Ok(())
    }
}
