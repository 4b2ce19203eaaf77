//! Discovery records
//!
//! [`McpMetadata`] is the canonical record written to the registry. Its derived
//! fields (`tool_count`, scores, credentials, `format`) are always computed from
//! the tool inventory by the constructors here, never set independently.

use crate::discovery::scoring::Scorer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to the placeholder tool emitted when the inventory is unknown
pub const UNKNOWN_TOOL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

/// A callable capability exposed by an MCP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl ToolDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: Vec::new(),
        }
    }

    /// Placeholder meaning "inventory unknown", as opposed to "no tools"
    pub fn unknown() -> Self {
        Self::named(UNKNOWN_TOOL)
    }

    pub fn with_parameters(mut self, parameters: Vec<ParameterDescriptor>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == UNKNOWN_TOOL && self.parameters.is_empty()
    }
}

/// A credential an MCP probably needs. Heuristic, never authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRequirement {
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Where a record was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "github")]
    VcsHost,
    #[serde(rename = "npm")]
    PackageRegistry,
    #[serde(rename = "local")]
    Local,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::VcsHost => "github",
            SourceKind::PackageRegistry => "npm",
            SourceKind::Local => "local",
        };
        f.write_str(name)
    }
}

/// Recommended integration strategy, derived from the tool count alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationFormat {
    Progressive,
    Cli,
    Skill,
    Direct,
}

impl fmt::Display for IntegrationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntegrationFormat::Progressive => "progressive",
            IntegrationFormat::Cli => "cli",
            IntegrationFormat::Skill => "skill",
            IntegrationFormat::Direct => "direct",
        };
        f.write_str(name)
    }
}

/// Identity of a discovered package, as reported by its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub name: String,
    pub source: SourceKind,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpMetadata {
    pub name: String,
    pub source: SourceKind,
    pub url: String,
    pub description: String,
    pub tools: Vec<ToolDescriptor>,
    pub tool_count: usize,
    pub complexity_score: f64,
    pub context_cost_estimate: u64,
    pub dependencies: Vec<String>,
    pub credentials_needed: Vec<CredentialRequirement>,
    pub discovered_at: DateTime<Utc>,
    pub format: IntegrationFormat,
}

impl McpMetadata {
    /// Build a record from an analyzed tool inventory, deriving every score
    pub fn from_inventory(
        origin: Origin,
        tools: Vec<ToolDescriptor>,
        dependencies: Vec<String>,
        scorer: &Scorer,
    ) -> Self {
        let assessment = scorer.assess(&tools);

        Self {
            name: origin.name,
            source: origin.source,
            url: origin.url,
            description: origin.description,
            tool_count: tools.len(),
            tools,
            complexity_score: assessment.complexity_score,
            context_cost_estimate: assessment.context_cost_estimate,
            dependencies,
            credentials_needed: assessment.credentials_needed,
            discovered_at: Utc::now(),
            format: assessment.format,
        }
    }

    /// Build a record for a package whose sources were never analyzed
    pub fn unanalyzed(origin: Origin, dependencies: Vec<String>) -> Self {
        Self {
            name: origin.name,
            source: origin.source,
            url: origin.url,
            description: origin.description,
            tools: Vec::new(),
            tool_count: 0,
            complexity_score: 0.0,
            context_cost_estimate: 0,
            dependencies,
            credentials_needed: Vec::new(),
            discovered_at: Utc::now(),
            format: IntegrationFormat::Direct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Origin {
        Origin {
            name: "github-mcp".to_string(),
            source: SourceKind::VcsHost,
            url: "https://github.com/acme/github-mcp".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_from_inventory_keeps_tool_count_in_sync() {
        let tools = vec![
            ToolDescriptor::named("create_issue"),
            ToolDescriptor::named("list_repos"),
        ];
        let metadata = McpMetadata::from_inventory(origin(), tools, vec![], &Scorer::default());

        assert_eq!(metadata.tool_count, metadata.tools.len());
        assert_eq!(metadata.tool_count, 2);
        assert_eq!(metadata.format, IntegrationFormat::Cli);
        assert_eq!(metadata.context_cost_estimate, 200);
    }

    #[test]
    fn test_unanalyzed_is_direct_and_free() {
        let metadata = McpMetadata::unanalyzed(origin(), vec!["zod".to_string()]);
        assert_eq!(metadata.tool_count, 0);
        assert_eq!(metadata.complexity_score, 0.0);
        assert_eq!(metadata.context_cost_estimate, 0);
        assert_eq!(metadata.format, IntegrationFormat::Direct);
        assert_eq!(metadata.dependencies, vec!["zod"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let metadata = McpMetadata::unanalyzed(origin(), vec![]);
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["source"], "github");
        assert_eq!(json["format"], "direct");
        assert!(json.get("tool_count").is_some());
        assert!(json.get("context_cost_estimate").is_some());
        assert!(json.get("credentials_needed").is_some());
        assert!(json.get("discovered_at").is_some());
    }

    #[test]
    fn test_placeholder_tool() {
        assert!(ToolDescriptor::unknown().is_placeholder());
        assert!(!ToolDescriptor::named("search").is_placeholder());
    }
}
