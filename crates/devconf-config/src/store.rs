// ── TOML-backed device configuration store ──
//
// One table per device context:
//
//   ["Sound Blaster 16 #2"]
//   base = 544
//   irq = 5
//   rom = "roms/sb16.rom"
//
// The whole file is read on open and rewritten on save; nothing touches
// disk in between.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use devconf_core::{ConfigStore, MemoryStore, StoreValue};
use tracing::{debug, info};

use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: MemoryStore,
    dirty: bool,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file missing, starting empty");
                MemoryStore::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether values changed since the store was opened or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn values(&self) -> &MemoryStore {
        &self.values
    }

    pub fn section(&self, namespace: &str) -> Option<&BTreeMap<String, StoreValue>> {
        self.values.sections().get(namespace)
    }

    /// Write every section back to disk, creating parent directories.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text)?;
        self.dirty = false;
        info!(path = %self.path.display(), "saved device configuration");
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn get_int(&self, namespace: &str, key: &str, default: i64) -> i64 {
        self.values.get_int(namespace, key, default)
    }

    fn get_string(&self, namespace: &str, key: &str, default: &str) -> String {
        self.values.get_string(namespace, key, default)
    }

    fn set_int(&mut self, namespace: &str, key: &str, value: i64) {
        self.values.set_int(namespace, key, value);
        self.dirty = true;
    }

    fn set_string(&mut self, namespace: &str, key: &str, value: &str) {
        self.values.set_string(namespace, key, value);
        self.dirty = true;
    }

    fn has_section(&self, namespace: &str) -> bool {
        self.values.has_section(namespace)
    }
}
