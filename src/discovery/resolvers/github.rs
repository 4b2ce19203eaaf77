//! GitHub repository resolver

use crate::discovery::analyzer::{RepoHandle, ToolAnalyzer};
use crate::discovery::error::{DiscoveryError, DiscoveryResult};
use crate::discovery::scoring::Scorer;
use crate::discovery::types::{McpMetadata, Origin, SourceKind};
use crate::http::{Header, HttpClient};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const SERVICE: &str = "GitHub API";
const DEFAULT_BRANCH: &str = "main";
/// Branches probed for `package.json`, in order
const MANIFEST_BRANCHES: &[&str] = &["main", "master"];

#[derive(Debug, Deserialize)]
struct RepoInfo {
    name: String,
    html_url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
}

pub struct GitHubResolver {
    http: Arc<dyn HttpClient>,
    token: Option<String>,
    api_base: String,
    analyzer: ToolAnalyzer,
    scorer: Arc<Scorer>,
}

impl GitHubResolver {
    pub fn new(http: Arc<dyn HttpClient>, token: Option<String>, scorer: Arc<Scorer>) -> Self {
        Self {
            analyzer: ToolAnalyzer::new(http.clone()),
            http,
            token,
            api_base: GITHUB_API_BASE.to_string(),
            scorer,
        }
    }

    pub fn analyzer(&self) -> &ToolAnalyzer {
        &self.analyzer
    }

    fn headers(&self) -> Vec<Header> {
        let mut headers = vec![("Accept", "application/vnd.github+json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }
        headers
    }

    fn raw_headers(&self) -> Vec<Header> {
        self.token
            .iter()
            .map(|token| ("Authorization", format!("Bearer {}", token)))
            .collect()
    }

    pub fn repo_url(&self, repo_path: &str) -> String {
        format!("{}/repos/{}", self.api_base, repo_path)
    }

    /// Resolve `owner/repo` into a full metadata record.
    pub fn resolve(&self, repo_path: &str) -> DiscoveryResult<McpMetadata> {
        let response = self.http.get(&self.repo_url(repo_path), &self.headers())?;
        if !response.is_success() {
            return Err(DiscoveryError::Upstream {
                service: SERVICE,
                status: response.status,
            });
        }

        let repo: RepoInfo = response
            .json()
            .map_err(|e| DiscoveryError::malformed(SERVICE, format!("{:#}", e)))?;

        let manifest = self.fetch_manifest(repo_path);
        let branch = repo
            .default_branch
            .clone()
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        let tools = self
            .analyzer
            .analyze(&RepoHandle::new(repo_path, branch), &self.raw_headers());

        info!(repo = repo_path, tool_count = tools.len(), "Analyzed repository");

        let origin = Origin {
            name: repo.name,
            source: SourceKind::VcsHost,
            url: repo.html_url,
            description: repo.description.unwrap_or_default(),
        };
        let dependencies = manifest.map(|m| m.dependencies.into_keys().collect());

        Ok(McpMetadata::from_inventory(
            origin,
            tools,
            dependencies.unwrap_or_default(),
            &self.scorer,
        ))
    }

    /// Best-effort `package.json` lookup; any failure means "no manifest".
    fn fetch_manifest(&self, repo_path: &str) -> Option<PackageManifest> {
        for branch in MANIFEST_BRANCHES {
            let handle = RepoHandle::new(repo_path, *branch);
            let url = self.analyzer.raw_url(&handle, "package.json");

            match self.http.get(&url, &self.raw_headers()) {
                Ok(response) if response.is_success() => match response.json() {
                    Ok(manifest) => return Some(manifest),
                    Err(e) => debug!(repo = repo_path, branch, error = %e, "Unreadable package.json"),
                },
                Ok(response) => {
                    debug!(repo = repo_path, branch, status = response.status, "No package.json")
                }
                Err(e) => debug!(repo = repo_path, branch, error = %e, "Failed to fetch package.json"),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::types::IntegrationFormat;
    use crate::http::{HttpResponse, MockHttpClient};
    use serde_json::json;

    fn resolver(http: &Arc<MockHttpClient>, token: Option<&str>) -> GitHubResolver {
        GitHubResolver::new(
            http.clone(),
            token.map(str::to_string),
            Arc::new(Scorer::default()),
        )
    }

    fn add_repo(http: &MockHttpClient, path: &str, name: &str) {
        http.add_json(
            format!("https://api.github.com/repos/{}", path),
            json!({
                "name": name,
                "html_url": format!("https://github.com/{}", path),
                "description": "Issue tracker bridge",
                "default_branch": "main"
            }),
        );
    }

    #[test]
    fn test_resolves_repository() {
        let http = Arc::new(MockHttpClient::new());
        add_repo(&http, "acme/github-mcp", "github-mcp");
        http.add_json(
            "https://raw.githubusercontent.com/acme/github-mcp/main/package.json",
            json!({"dependencies": {"zod": "^3.0.0", "@modelcontextprotocol/sdk": "^1.0.0"}}),
        );
        http.add_text(
            "https://raw.githubusercontent.com/acme/github-mcp/main/src/index.ts",
            r#"server.tool({ name: "github_create_issue" }); server.tool({ name: "github_search" });"#,
        );

        let metadata = resolver(&http, None).resolve("acme/github-mcp").unwrap();

        assert_eq!(metadata.name, "github-mcp");
        assert_eq!(metadata.source, SourceKind::VcsHost);
        assert_eq!(metadata.url, "https://github.com/acme/github-mcp");
        assert_eq!(metadata.description, "Issue tracker bridge");
        assert_eq!(metadata.dependencies, vec!["@modelcontextprotocol/sdk", "zod"]);
        assert_eq!(metadata.tool_count, 2);
        assert_eq!(metadata.complexity_score, 2.0);
        assert_eq!(metadata.context_cost_estimate, 200);
        assert_eq!(metadata.format, IntegrationFormat::Cli);
        assert_eq!(metadata.credentials_needed.len(), 1);
        assert_eq!(metadata.credentials_needed[0].name, "GITHUB_TOKEN");
    }

    #[test]
    fn test_manifest_falls_back_to_master() {
        let http = Arc::new(MockHttpClient::new());
        add_repo(&http, "acme/old", "old");
        http.add_json(
            "https://raw.githubusercontent.com/acme/old/master/package.json",
            json!({"dependencies": {"express": "4"}}),
        );

        let metadata = resolver(&http, None).resolve("acme/old").unwrap();
        assert_eq!(metadata.dependencies, vec!["express"]);
    }

    #[test]
    fn test_unparseable_manifest_is_empty() {
        let http = Arc::new(MockHttpClient::new());
        add_repo(&http, "acme/broken", "broken");
        http.add_text(
            "https://raw.githubusercontent.com/acme/broken/main/package.json",
            "{ not json",
        );

        let metadata = resolver(&http, None).resolve("acme/broken").unwrap();
        assert!(metadata.dependencies.is_empty());
        assert_eq!(metadata.tools[0].name, "unknown");
    }

    #[test]
    fn test_missing_description_is_empty() {
        let http = Arc::new(MockHttpClient::new());
        http.add_json(
            "https://api.github.com/repos/a/b",
            json!({"name": "b", "html_url": "https://github.com/a/b", "description": null}),
        );

        let metadata = resolver(&http, None).resolve("a/b").unwrap();
        assert_eq!(metadata.description, "");
    }

    #[test]
    fn test_non_success_is_upstream_error() {
        let http = Arc::new(MockHttpClient::new());
        http.add_response(
            "https://api.github.com/repos/a/private",
            HttpResponse::new(403, "rate limited"),
        );

        let err = resolver(&http, None).resolve("a/private").unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::Upstream { status: 403, .. }
        ));
        assert_eq!(http.request_count(), 1);
    }

    #[test]
    fn test_malformed_repo_payload() {
        let http = Arc::new(MockHttpClient::new());
        http.add_json("https://api.github.com/repos/a/b", json!({"id": 1}));

        let err = resolver(&http, None).resolve("a/b").unwrap_err();
        assert!(matches!(err, DiscoveryError::MalformedPayload { .. }));
    }

    #[test]
    fn test_sends_token_when_configured() {
        let http = Arc::new(MockHttpClient::new());
        add_repo(&http, "a/b", "b");

        resolver(&http, Some("secret")).resolve("a/b").unwrap();

        let first = &http.requests()[0];
        assert!(first
            .headers
            .contains(&("Authorization".to_string(), "Bearer secret".to_string())));
    }
}
