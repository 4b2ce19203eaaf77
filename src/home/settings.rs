//! Persisted settings (`config/mcm-config.json`)

use super::HomeError;
use crate::discovery::scoring::{CredentialDetector, CredentialRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

pub const SETTINGS_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub version: String,
    pub strategy: String,
    pub confidence_threshold: f64,
    pub max_tool_budget_percent: u32,
    pub auto_unload_after_messages: u32,
    #[serde(default)]
    pub pinned_mcps: Vec<String>,
    /// Extra keyword → credential rules for credential detection
    #[serde(default)]
    pub credential_hints: Vec<CredentialRule>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION.to_string(),
            strategy: "balanced".to_string(),
            confidence_threshold: 0.7,
            max_tool_budget_percent: 40,
            auto_unload_after_messages: 3,
            pinned_mcps: Vec::new(),
            credential_hints: Vec::new(),
            updated_at: None,
        }
    }
}

impl Settings {
    pub fn load_or_init(path: &Path) -> Result<Self, HomeError> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                HomeError::InvalidSettings {
                    path: path.to_path_buf(),
                    source,
                }
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Writing default settings");
                let mut settings = Self::default();
                settings.save(path)?;
                Ok(settings)
            }
            Err(source) => Err(HomeError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Stamp `updated_at` and write the settings as pretty JSON
    pub fn save(&mut self, path: &Path) -> Result<(), HomeError> {
        self.updated_at = Some(Utc::now());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| HomeError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| {
            HomeError::InvalidSettings {
                path: path.to_path_buf(),
                source,
            }
        })?;

        fs::write(path, json).map_err(|source| HomeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Built-in credential rules extended with the configured hints
    pub fn credential_detector(&self) -> CredentialDetector {
        CredentialDetector::default().with_rules(self.credential_hints.iter().cloned())
    }
}
