//! Scoring engine: pure functions over a tool inventory.

use crate::discovery::types::{CredentialRequirement, IntegrationFormat, ToolDescriptor};
use serde::{Deserialize, Serialize};

/// Context cost assumed when nothing is known about the inventory
pub const UNKNOWN_INVENTORY_COST: u64 = 500;
const TOKENS_PER_TOOL: u64 = 100;
const TOKENS_PER_PARAMETER: u64 = 50;

/// `len(tools) * (1 + avg_params * 0.5)`, or 0 for an empty inventory
pub fn complexity_score(tools: &[ToolDescriptor]) -> f64 {
    if tools.is_empty() {
        return 0.0;
    }

    let total_params: usize = tools.iter().map(|t| t.parameters.len()).sum();
    let avg_params = total_params as f64 / tools.len() as f64;

    tools.len() as f64 * (1.0 + avg_params * 0.5)
}

/// Rough token cost of exposing the inventory to a model
pub fn context_cost_estimate(tools: &[ToolDescriptor]) -> u64 {
    if tools.is_empty() {
        return UNKNOWN_INVENTORY_COST;
    }

    tools
        .iter()
        .map(|t| TOKENS_PER_TOOL + TOKENS_PER_PARAMETER * t.parameters.len() as u64)
        .sum()
}

pub fn recommend_format(tool_count: usize) -> IntegrationFormat {
    match tool_count {
        0 => IntegrationFormat::Direct,
        n if n >= 10 => IntegrationFormat::Progressive,
        n if n <= 5 => IntegrationFormat::Cli,
        _ => IntegrationFormat::Skill,
    }
}

/// Maps a provider keyword found in tool names to the credential it implies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRule {
    pub keyword: String,
    pub requirement: CredentialRequirement,
}

impl CredentialRule {
    pub fn new(keyword: &str, name: &str, description: &str, url: &str, scopes: &[&str]) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            requirement: CredentialRequirement {
                name: name.to_string(),
                description: description.to_string(),
                url: url.to_string(),
                scopes: scopes.iter().map(|s| s.to_string()).collect(),
            },
        }
    }
}

/// Keyword table used for credential detection.
///
/// Rules are matched case-insensitively against the space-joined tool names.
/// A keyword is only ever registered once; later duplicates are ignored.
#[derive(Debug, Clone)]
pub struct CredentialDetector {
    rules: Vec<CredentialRule>,
}

impl Default for CredentialDetector {
    fn default() -> Self {
        Self::empty()
            .with_rule(CredentialRule::new(
                "github",
                "GITHUB_TOKEN",
                "GitHub Personal Access Token",
                "https://github.com/settings/tokens",
                &["repo", "read:org"],
            ))
            .with_rule(CredentialRule::new(
                "gitlab",
                "GITLAB_TOKEN",
                "GitLab Personal Access Token",
                "https://gitlab.com/-/user_settings/personal_access_tokens",
                &["api"],
            ))
            .with_rule(CredentialRule::new(
                "slack",
                "SLACK_BOT_TOKEN",
                "Slack Bot User OAuth Token",
                "https://api.slack.com/apps",
                &["channels:read", "chat:write"],
            ))
    }
}

impl CredentialDetector {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: CredentialRule) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = CredentialRule>) -> Self {
        for rule in rules {
            self.add_rule(rule);
        }
        self
    }

    pub fn add_rule(&mut self, mut rule: CredentialRule) {
        rule.keyword = rule.keyword.trim().to_lowercase();
        if rule.keyword.is_empty() || self.rules.iter().any(|r| r.keyword == rule.keyword) {
            return;
        }
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[CredentialRule] {
        &self.rules
    }

    pub fn detect(&self, tools: &[ToolDescriptor]) -> Vec<CredentialRequirement> {
        let haystack = tools
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let mut found: Vec<CredentialRequirement> = Vec::new();
        for rule in &self.rules {
            if haystack.contains(&rule.keyword)
                && !found.iter().any(|c| c.name == rule.requirement.name)
            {
                found.push(rule.requirement.clone());
            }
        }
        found
    }
}

/// Every score derived from one inventory
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub complexity_score: f64,
    pub context_cost_estimate: u64,
    pub credentials_needed: Vec<CredentialRequirement>,
    pub format: IntegrationFormat,
}

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    credentials: CredentialDetector,
}

impl Scorer {
    pub fn new(credentials: CredentialDetector) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &CredentialDetector {
        &self.credentials
    }

    pub fn assess(&self, tools: &[ToolDescriptor]) -> Assessment {
        Assessment {
            complexity_score: complexity_score(tools),
            context_cost_estimate: context_cost_estimate(tools),
            credentials_needed: self.credentials.detect(tools),
            format: recommend_format(tools.len()),
        }
    }
}
