//! Shared configuration for devconf.
//!
//! Application settings (where the device store lives, where logs go)
//! layered from defaults, a TOML file and `DEVCONF_*` environment
//! variables, plus [`FileStore`], the TOML-backed [`ConfigStore`] the
//! configuration dialogs read from and write to.

mod store;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::FileStore;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Device configuration store. Defaults to `devices.toml` in the
    /// platform config directory.
    pub store_path: Option<PathBuf>,

    /// Log file. Defaults to `devconf.log` in the platform cache directory.
    pub log_file: Option<PathBuf>,

    /// Show bus tags (`[ISA16] …`) in device listings.
    #[serde(default)]
    pub show_bus: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: None,
            log_file: None,
            show_bus: true,
        }
    }
}

impl Settings {
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| config_dir().join("devices.toml"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| cache_dir().join("devconf.log"))
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("rs", "devconf", "devconf")
}

fn config_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config"),
        |dirs| dirs.config_dir().to_path_buf(),
    )
}

fn cache_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".cache"),
        |dirs| dirs.cache_dir().to_path_buf(),
    )
}

fn dirs_fallback(kind: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(kind);
    p.push("devconf");
    p
}

/// Resolve the settings file path via XDG / platform conventions.
pub fn settings_path() -> PathBuf {
    config_dir().join("config.toml")
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load settings from the canonical settings file plus environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&settings_path())
}

/// Load settings from `path` plus environment. A missing file is fine.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DEVCONF_"));

    Ok(figment.extract()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings.store_path, None);
        assert!(settings.show_bus);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "store_path = \"/srv/emu/devices.toml\"\nshow_bus = false\n",
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(
            settings.store_path(),
            PathBuf::from("/srv/emu/devices.toml")
        );
        assert!(!settings.show_bus);
    }

    #[test]
    fn default_paths_have_expected_file_names() {
        let settings = Settings::default();
        assert!(settings.store_path().ends_with("devices.toml"));
        assert!(settings.log_file().ends_with("devconf.log"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "show_bus = \"sometimes\"\n").unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }
}
