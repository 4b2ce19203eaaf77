//! End-to-end discovery against a mocked network

use mcm::discovery::types::{IntegrationFormat, SourceKind};
use mcm::discovery::{classify_input, ItemOutcome};
use mcm::http::{HttpResponse, MockHttpClient};
use mcm::{DiscoveryOrchestrator, McmConfig, McmHome, Scorer};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const INDEX_TS: &str = r#"
import { Server } from "@modelcontextprotocol/sdk/server/index.js";

server.tool({ name: "github_create_issue", description: "Open an issue" });
server.tool({ name: 'list_repos' });
server.tool({ name: "github_create_issue" });
"#;

fn config(home: &McmHome) -> McmConfig {
    McmConfig {
        home: home.root().to_path_buf(),
        search_api_key: None,
        github_token: None,
        request_timeout_secs: 30,
        request_delay: Duration::ZERO,
        log_level: "info".to_string(),
        log_json: false,
    }
}

fn mock_github_repo(http: &MockHttpClient) {
    http.add_json(
        "https://api.github.com/repos/acme/github-mcp",
        json!({
            "name": "github-mcp",
            "html_url": "https://github.com/acme/github-mcp",
            "description": "GitHub tools",
            "default_branch": "trunk"
        }),
    );
    http.add_json(
        "https://raw.githubusercontent.com/acme/github-mcp/main/package.json",
        json!({ "dependencies": { "zod": "^3", "@modelcontextprotocol/sdk": "^1" } }),
    );
    http.add_text(
        "https://raw.githubusercontent.com/acme/github-mcp/trunk/src/index.ts",
        INDEX_TS,
    );
}

#[test]
fn test_github_url_to_registry() {
    let dir = TempDir::new().unwrap();
    let home = McmHome::new(dir.path().join(".mcm"));
    let http = Arc::new(MockHttpClient::new());
    mock_github_repo(&http);

    let orchestrator = DiscoveryOrchestrator::new(&config(&home), http.clone(), Scorer::default());
    let ids = classify_input("https://github.com/acme/github-mcp\n");
    let report = orchestrator.run(&ids, &home.registry());

    assert_eq!(
        report.outcomes,
        vec![ItemOutcome::Discovered {
            identifier: "acme/github-mcp".to_string(),
            name: "github-mcp".to_string(),
            tool_count: 2,
            format: IntegrationFormat::Cli,
        }]
    );

    let record = home.registry().get("github-mcp").unwrap().unwrap();
    assert_eq!(record.source, SourceKind::VcsHost);
    assert_eq!(record.url, "https://github.com/acme/github-mcp");
    assert_eq!(record.tool_count, record.tools.len());
    assert_eq!(record.format, IntegrationFormat::Cli);
    assert_eq!(record.tools[0].name, "github_create_issue");
    assert_eq!(record.tools[1].name, "list_repos");
    assert_eq!(record.context_cost_estimate, 200);
    assert_eq!(
        record.dependencies,
        vec!["@modelcontextprotocol/sdk".to_string(), "zod".to_string()]
    );
    assert!(record
        .credentials_needed
        .iter()
        .any(|c| c.name == "GITHUB_TOKEN"));
}

#[test]
fn test_npm_package_delegates_to_github() {
    let dir = TempDir::new().unwrap();
    let home = McmHome::new(dir.path().join(".mcm"));
    let http = Arc::new(MockHttpClient::new());
    mock_github_repo(&http);
    http.add_json(
        "https://registry.npmjs.org/@acme/github-mcp",
        json!({
            "name": "@acme/github-mcp",
            "dist-tags": { "latest": "2.0.0" },
            "versions": {
                "2.0.0": {
                    "repository": { "type": "git", "url": "git+https://github.com/acme/github-mcp.git" }
                }
            }
        }),
    );

    let orchestrator = DiscoveryOrchestrator::new(&config(&home), http.clone(), Scorer::default());
    let report = orchestrator.run(&classify_input("@acme/github-mcp"), &home.registry());

    assert_eq!(report.discovered(), 1);
    assert!(home.registry().get("github-mcp").unwrap().is_some());
}

#[test]
fn test_rediscovery_replaces_record() {
    let dir = TempDir::new().unwrap();
    let home = McmHome::new(dir.path().join(".mcm"));
    let http = Arc::new(MockHttpClient::new());
    mock_github_repo(&http);

    let store = home.registry();
    let orchestrator = DiscoveryOrchestrator::new(&config(&home), http.clone(), Scorer::default());
    let ids = classify_input("https://github.com/acme/github-mcp");

    orchestrator.run(&ids, &store);
    http.add_response(
        "https://raw.githubusercontent.com/acme/github-mcp/trunk/src/index.ts",
        HttpResponse::not_found(),
    );
    orchestrator.run(&ids, &store);

    let entries = store.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].tool_count, 1);
    assert!(store.get("github-mcp").unwrap().unwrap().tools[0].is_placeholder());
}

#[test]
fn test_mixed_batch_keeps_going() {
    let dir = TempDir::new().unwrap();
    let home = McmHome::new(dir.path().join(".mcm"));
    let http = Arc::new(MockHttpClient::new());
    mock_github_repo(&http);
    http.fail(
        "https://api.github.com/repos/acme/broken",
        "connection reset",
    );

    let orchestrator = DiscoveryOrchestrator::new(&config(&home), http.clone(), Scorer::default());
    let input = "github.com/acme/broken\nacme/unsearchable\nhttps://github.com/acme/github-mcp\n";
    let report = orchestrator.run(&classify_input(input), &home.registry());

    assert_eq!(report.outcomes.len(), 3);
    assert!(matches!(report.outcomes[0], ItemOutcome::Failed { .. }));
    assert!(matches!(report.outcomes[1], ItemOutcome::NotFound { .. }));
    assert!(report.outcomes[2].is_success());
    assert_eq!(home.registry().list().unwrap().len(), 1);
}
