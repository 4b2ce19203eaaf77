//! Heuristic tool extraction
//!
//! Fetches a handful of conventional MCP server entry points from a repository
//! and pulls tool names out of the first one that exists. This is text matching,
//! not parsing: tools registered in unusual ways are missed, and the inventory
//! then falls back to a single `unknown` placeholder.

use crate::discovery::types::ToolDescriptor;
use crate::http::{Header, HttpClient};
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, warn};

pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Entry points tried in order
pub const CANDIDATE_PATHS: &[&str] = &[
    "src/index.ts",
    "src/index.js",
    "index.ts",
    "index.js",
    "server.ts",
    "server.js",
];

/// Substrings that indicate the file registers tools
pub const DECLARATION_MARKERS: &[&str] = &["addTool", "server.tool", "registerTool"];

const TOOL_NAME_PATTERN: &str = r#"name:\s*["']([^"']+)["']"#;

/// A repository on the VCS host at a specific branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHandle {
    /// `owner/repo`
    pub path: String,
    pub branch: String,
}

impl RepoHandle {
    pub fn new(path: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            branch: branch.into(),
        }
    }
}

pub struct ToolAnalyzer {
    http: Arc<dyn HttpClient>,
    raw_base: String,
    name_re: Regex,
}

impl ToolAnalyzer {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            raw_base: RAW_CONTENT_BASE.to_string(),
            name_re: Regex::new(TOOL_NAME_PATTERN).expect("valid regex"),
        }
    }

    pub fn raw_url(&self, repo: &RepoHandle, file_path: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.raw_base, repo.path, repo.branch, file_path
        )
    }

    /// Extract the tool inventory; never empty.
    pub fn analyze(&self, repo: &RepoHandle, headers: &[Header]) -> Vec<ToolDescriptor> {
        for file_path in CANDIDATE_PATHS {
            let url = self.raw_url(repo, file_path);
            let content = match self.http.get(&url, headers) {
                Ok(response) if response.is_success() => response.body,
                Ok(response) => {
                    debug!(repo = %repo.path, file = file_path, status = response.status, "Entry point not found");
                    continue;
                }
                Err(e) => {
                    warn!(repo = %repo.path, file = file_path, error = %e, "Failed to fetch entry point");
                    continue;
                }
            };

            let tools = self.extract_tools(&content);
            debug!(
                repo = %repo.path,
                file = file_path,
                tool_count = tools.len(),
                "Scanned entry point"
            );

            if tools.is_empty() {
                break;
            }
            return tools;
        }

        vec![ToolDescriptor::unknown()]
    }

    /// Tool names declared in `content`, deduplicated in first-seen order.
    /// Empty when the content carries no declaration marker.
    pub fn extract_tools(&self, content: &str) -> Vec<ToolDescriptor> {
        if !DECLARATION_MARKERS.iter().any(|m| content.contains(m)) {
            return Vec::new();
        }

        let mut names: Vec<&str> = Vec::new();
        for cap in self.name_re.captures_iter(content) {
            if let Some(name) = cap.get(1) {
                let name = name.as_str();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        names.into_iter().map(ToolDescriptor::named).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockHttpClient};

    const SERVER_SOURCE: &str = r#"
import { McpServer } from "@modelcontextprotocol/sdk/server/mcp.js";

server.tool({
  name: "create_issue",
  description: "Create an issue",
});
server.tool({ name: 'list_issues' });
server.tool({ name: "create_issue" });
"#;

    fn setup() -> (Arc<MockHttpClient>, ToolAnalyzer, RepoHandle) {
        let http = Arc::new(MockHttpClient::new());
        let analyzer = ToolAnalyzer::new(http.clone());
        (http, analyzer, RepoHandle::new("acme/tracker-mcp", "main"))
    }

    #[test]
    fn test_extract_tools_requires_marker() {
        let (_, analyzer, _) = setup();
        assert!(analyzer
            .extract_tools(r#"const config = { name: "not-a-tool" };"#)
            .is_empty());
    }

    #[test]
    fn test_extract_tools_dedupes_in_order() {
        let (_, analyzer, _) = setup();
        let names: Vec<_> = analyzer
            .extract_tools(SERVER_SOURCE)
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["create_issue", "list_issues"]);
    }

    #[test]
    fn test_uses_first_entry_point_found() {
        let (http, analyzer, repo) = setup();
        http.add_text(analyzer.raw_url(&repo, "index.ts"), SERVER_SOURCE);
        http.add_text(
            analyzer.raw_url(&repo, "server.js"),
            r#"server.tool({ name: "other" })"#,
        );

        let tools = analyzer.analyze(&repo, &[]);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "create_issue");

        let urls = http.requested_urls();
        assert_eq!(urls.len(), 3);
        assert!(urls[2].ends_with("/main/index.ts"));
    }

    #[test]
    fn test_placeholder_when_nothing_found() {
        let (http, analyzer, repo) = setup();
        let tools = analyzer.analyze(&repo, &[]);

        assert_eq!(tools, vec![ToolDescriptor::unknown()]);
        assert_eq!(http.request_count(), CANDIDATE_PATHS.len());
    }

    #[test]
    fn test_stops_at_first_fetched_file_without_marker() {
        let (http, analyzer, repo) = setup();
        http.add_text(analyzer.raw_url(&repo, "src/index.ts"), "export {}");
        http.add_text(analyzer.raw_url(&repo, "index.js"), SERVER_SOURCE);

        let tools = analyzer.analyze(&repo, &[]);
        assert_eq!(tools, vec![ToolDescriptor::unknown()]);
        assert_eq!(http.request_count(), 1);
    }

    #[test]
    fn test_transport_errors_fall_through() {
        let (http, analyzer, repo) = setup();
        http.fail(analyzer.raw_url(&repo, "src/index.ts"), "timed out");
        http.add_response(
            analyzer.raw_url(&repo, "src/index.js"),
            HttpResponse::ok(r#"server.addTool({ name: "fetch" })"#),
        );

        let tools = analyzer.analyze(&repo, &[]);
        assert_eq!(tools, vec![ToolDescriptor::named("fetch")]);
    }

    #[test]
    fn test_uses_branch_in_raw_url() {
        let (_, analyzer, _) = setup();
        let repo = RepoHandle::new("acme/legacy", "master");
        assert_eq!(
            analyzer.raw_url(&repo, "server.ts"),
            "https://raw.githubusercontent.com/acme/legacy/master/server.ts"
        );
    }
}
