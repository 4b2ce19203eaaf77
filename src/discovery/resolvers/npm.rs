//! npm registry resolver
//!
//! The registry entry is mostly an indirection: when the latest version points
//! at a GitHub repository, resolution is handed to [`GitHubResolver`].

use super::{vcs_repo_path, GitHubResolver};
use crate::discovery::error::{DiscoveryError, DiscoveryResult};
use crate::discovery::types::{McpMetadata, Origin, SourceKind};
use crate::http::HttpClient;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

pub const NPM_REGISTRY_BASE: &str = "https://registry.npmjs.org";
pub const NPM_PACKAGE_PAGE_BASE: &str = "https://www.npmjs.com/package";
const SERVICE: &str = "NPM registry";

#[derive(Debug, Deserialize)]
struct PackageDocument {
    name: String,
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    /// Kept raw; only the latest entry is decoded
    #[serde(default)]
    versions: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct VersionManifest {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    repository: Option<Repository>,
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
}

/// `repository` may be an object with a `url` or a bare string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Repository {
    Detailed {
        #[serde(default)]
        url: Option<String>,
    },
    Shorthand(String),
}

impl Repository {
    fn url(&self) -> Option<&str> {
        match self {
            Repository::Detailed { url } => url.as_deref(),
            Repository::Shorthand(url) => Some(url),
        }
    }
}

/// Strip the `git+` transport prefix and `.git` suffix from a repository URL,
/// and rewrite the SSH form `github.com:owner/repo` to the path form.
pub fn normalize_repository_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.replace("github.com:", "github.com/")
}

pub struct RegistryResolver {
    http: Arc<dyn HttpClient>,
    github: Arc<GitHubResolver>,
    registry_base: String,
}

impl RegistryResolver {
    pub fn new(http: Arc<dyn HttpClient>, github: Arc<GitHubResolver>) -> Self {
        Self {
            http,
            github,
            registry_base: NPM_REGISTRY_BASE.to_string(),
        }
    }

    pub fn package_url(&self, package: &str) -> String {
        format!("{}/{}", self.registry_base, package)
    }

    pub fn resolve(&self, package: &str) -> DiscoveryResult<McpMetadata> {
        let response = self.http.get(&self.package_url(package), &[])?;
        if !response.is_success() {
            return Err(DiscoveryError::Upstream {
                service: SERVICE,
                status: response.status,
            });
        }

        let mut document: PackageDocument = response
            .json()
            .map_err(|e| DiscoveryError::malformed(SERVICE, format!("{:#}", e)))?;

        let latest = document
            .dist_tags
            .get("latest")
            .cloned()
            .ok_or_else(|| DiscoveryError::malformed(SERVICE, "no latest dist-tag"))?;
        let raw_manifest = document.versions.remove(&latest).ok_or_else(|| {
            DiscoveryError::malformed(SERVICE, format!("latest version {} is not listed", latest))
        })?;
        let manifest: VersionManifest = serde_json::from_value(raw_manifest).map_err(|e| {
            DiscoveryError::malformed(SERVICE, format!("version {}: {}", latest, e))
        })?;

        let repo_url = manifest
            .repository
            .as_ref()
            .and_then(Repository::url)
            .map(normalize_repository_url)
            .unwrap_or_default();

        if let Some(repo_path) = vcs_repo_path(&repo_url) {
            info!(package, repo = %repo_path, "Package points at GitHub, delegating");
            return self.github.resolve(&repo_path);
        }

        debug!(package, version = %latest, "No GitHub repository, recording package only");
        let origin = Origin {
            url: format!("{}/{}", NPM_PACKAGE_PAGE_BASE, package),
            name: document.name,
            source: SourceKind::PackageRegistry,
            description: manifest.description.unwrap_or_default(),
        };
        Ok(McpMetadata::unanalyzed(
            origin,
            manifest.dependencies.into_keys().collect(),
        ))
    }
}
