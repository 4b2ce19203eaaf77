//! The mcm home directory
//!
//! ```text
//! ~/.mcm/
//! ├── config/mcm-config.json
//! ├── registry/
//! ├── converted/skills/
//! ├── embeddings/  analytics/  cache/  backups/
//! └── logs/mcm.log
//! ```

mod settings;

pub use settings::{Settings, SETTINGS_VERSION};

use crate::registry::RegistryStore;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directories created under the home root
pub const LAYOUT: &[&str] = &[
    "config",
    "registry",
    "converted",
    "converted/skills",
    "embeddings",
    "analytics",
    "cache",
    "backups",
    "logs",
];

const SETTINGS_FILE: &str = "mcm-config.json";
const LOG_FILE: &str = "mcm.log";

#[derive(Debug, Error)]
pub enum HomeError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    InvalidSettings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct McmHome {
    root: PathBuf,
}

impl McmHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create every layout directory. Safe to call repeatedly.
    pub fn ensure_directories(&self) -> Result<(), HomeError> {
        for dir in LAYOUT {
            let path = self.root.join(dir);
            fs::create_dir_all(&path).map_err(|source| HomeError::Io { path, source })?;
        }
        Ok(())
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn registry_dir(&self) -> PathBuf {
        self.root.join("registry")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir().join(SETTINGS_FILE)
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE)
    }

    pub fn registry(&self) -> RegistryStore {
        RegistryStore::new(self.registry_dir())
    }

    /// Load persisted settings, writing the defaults on first use
    pub fn load_settings(&self) -> Result<Settings, HomeError> {
        Settings::load_or_init(&self.settings_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories_creates_layout() {
        let dir = TempDir::new().unwrap();
        let home = McmHome::new(dir.path().join(".mcm"));

        home.ensure_directories().unwrap();
        home.ensure_directories().unwrap();

        for sub in LAYOUT {
            assert!(home.root().join(sub).is_dir(), "missing {}", sub);
        }
    }

    #[test]
    fn test_paths() {
        let home = McmHome::new("/data/mcm");
        assert_eq!(
            home.settings_path(),
            PathBuf::from("/data/mcm/config/mcm-config.json")
        );
        assert_eq!(home.log_file(), PathBuf::from("/data/mcm/logs/mcm.log"));
        assert_eq!(
            home.registry().index_path(),
            PathBuf::from("/data/mcm/registry/index.json")
        );
    }

    #[test]
    fn test_ensure_directories_reports_blocked_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("home");
        fs::write(&file, "").unwrap();

        let err = McmHome::new(&file).ensure_directories().unwrap_err();
        assert!(matches!(err, HomeError::Io { .. }));
    }
}
