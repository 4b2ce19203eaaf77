//! Local registry of discovered MCPs
//!
//! Layout under the registry root:
//!
//! ```text
//! registry/
//! ├── index.json            summary of every record, least recently written first
//! └── <name>/metadata.json  full record
//! ```
//!
//! Writes are last-write-wins with no locking; concurrent processes writing the
//! same registry may lose index updates.

use crate::discovery::types::{IntegrationFormat, McpMetadata, SourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const INDEX_FILE: &str = "index.json";
const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode or decode {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Summary of one record in `index.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryIndexEntry {
    pub name: String,
    pub source: SourceKind,
    pub tool_count: usize,
    pub format: IntegrationFormat,
    pub discovered_at: DateTime<Utc>,
}

impl From<&McpMetadata> for RegistryIndexEntry {
    fn from(metadata: &McpMetadata) -> Self {
        Self {
            name: metadata.name.clone(),
            source: metadata.source,
            tool_count: metadata.tool_count,
            format: metadata.format,
            discovered_at: metadata.discovered_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryIndex {
    pub mcps: Vec<RegistryIndexEntry>,
    pub updated_at: DateTime<Utc>,
}

impl RegistryIndex {
    pub fn empty() -> Self {
        Self {
            mcps: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Replace any entry with the same name and append `entry` at the end
    pub fn record(&mut self, entry: RegistryIndexEntry) {
        self.mcps.retain(|m| m.name != entry.name);
        self.mcps.push(entry);
        self.updated_at = Utc::now();
    }
}

const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '%'];

/// Filesystem-safe directory name for a record.
///
/// Reserved characters, `%` and a leading `.` are percent-encoded, so distinct
/// names always map to distinct directories.
pub fn encode_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        if RESERVED_CHARS.contains(&c) || (i == 0 && c == '.') {
            encoded.push_str(&format!("%{:02X}", c as u32));
        } else {
            encoded.push(c);
        }
    }
    encoded
}

#[derive(Debug, Clone)]
pub struct RegistryStore {
    root: PathBuf,
}

impl RegistryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn metadata_path(&self, name: &str) -> PathBuf {
        self.root.join(encode_name(name)).join(METADATA_FILE)
    }

    /// Write `metadata`, replacing any record with the same name, and update the index.
    pub fn upsert(&self, metadata: &McpMetadata) -> Result<RegistryIndexEntry, PersistenceError> {
        let metadata_path = self.metadata_path(&metadata.name);
        write_json(&metadata_path, metadata)?;

        let mut index = self.load_index()?.unwrap_or_else(RegistryIndex::empty);
        let entry = RegistryIndexEntry::from(metadata);
        index.record(entry.clone());
        write_json(&self.index_path(), &index)?;

        debug!(name = %metadata.name, path = %metadata_path.display(), "Saved registry record");
        Ok(entry)
    }

    /// The index, or `None` if nothing was ever written
    pub fn load_index(&self) -> Result<Option<RegistryIndex>, PersistenceError> {
        read_json(&self.index_path())
    }

    /// Index entries, most recently written last. Empty for a fresh registry.
    pub fn list(&self) -> Result<Vec<RegistryIndexEntry>, PersistenceError> {
        Ok(self.load_index()?.map(|index| index.mcps).unwrap_or_default())
    }

    /// The stored record for `name`, ignoring any file whose record carries another name
    pub fn get(&self, name: &str) -> Result<Option<McpMetadata>, PersistenceError> {
        let path = self.metadata_path(name);
        let metadata: Option<McpMetadata> = read_json(&path)?;
        Ok(metadata.filter(|m| {
            let matches = m.name == name;
            if !matches {
                warn!(requested = name, stored = %m.name, path = %path.display(), "Record name mismatch");
            }
            matches
        }))
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| PersistenceError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>, PersistenceError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| PersistenceError::Json {
            path: path.to_path_buf(),
            source,
        })
}
