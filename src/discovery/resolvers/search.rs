//! Neural search resolver for bare names
//!
//! Asks the Exa search API for likely MCP repositories and hands the first
//! GitHub hit to [`GitHubResolver`].

use super::{vcs_repo_path, GitHubResolver};
use crate::discovery::error::{DiscoveryError, DiscoveryResult};
use crate::discovery::types::McpMetadata;
use crate::http::HttpClient;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const EXA_SEARCH_URL: &str = "https://api.exa.ai/search";
pub const SEARCH_KEY_ENV: &str = "EXA_API_KEY";
const SERVICE: &str = "Exa search";
const RESULT_LIMIT: u32 = 3;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    url: String,
}

pub fn search_query(identifier: &str) -> String {
    format!("model context protocol MCP {} server", identifier)
}

pub struct SearchResolver {
    http: Arc<dyn HttpClient>,
    github: Arc<GitHubResolver>,
    api_key: Option<String>,
    search_url: String,
}

impl SearchResolver {
    pub fn new(
        http: Arc<dyn HttpClient>,
        github: Arc<GitHubResolver>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            github,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            search_url: EXA_SEARCH_URL.to_string(),
        }
    }

    fn api_key(&self) -> DiscoveryResult<&str> {
        self.api_key
            .as_deref()
            .ok_or(DiscoveryError::CredentialMissing {
                name: SEARCH_KEY_ENV,
            })
    }

    /// Search for `identifier`; `Ok(None)` when nothing usable was found.
    ///
    /// A missing API key is not an error here: it is logged and treated as no
    /// result, without touching the network.
    pub fn resolve(&self, identifier: &str) -> DiscoveryResult<Option<McpMetadata>> {
        let api_key = match self.api_key() {
            Ok(key) => key,
            Err(e) => {
                warn!(identifier, "{}; skipping search", e);
                return Ok(None);
            }
        };

        let body = json!({
            "query": search_query(identifier),
            "numResults": RESULT_LIMIT,
            "useAutoprompt": true,
            "type": "neural",
        });
        let headers = [
            ("Content-Type", "application/json".to_string()),
            ("x-api-key", api_key.to_string()),
        ];

        let response = self.http.post_json(&self.search_url, &headers, &body)?;
        if !response.is_success() {
            warn!(identifier, status = response.status, "{} request failed", SERVICE);
            return Ok(None);
        }

        let results: SearchResponse = response
            .json()
            .map_err(|e| DiscoveryError::malformed(SERVICE, format!("{:#}", e)))?;
        debug!(identifier, hits = results.results.len(), "Search results");

        match results.results.iter().find_map(|hit| vcs_repo_path(&hit.url)) {
            Some(repo_path) => {
                info!(identifier, repo = %repo_path, "Search matched GitHub repository");
                self.github.resolve(&repo_path).map(Some)
            }
            None => {
                info!(identifier, "No GitHub repository among search results");
                Ok(None)
            }
        }
    }
}
