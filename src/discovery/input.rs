//! Input classification
//!
//! Turns newline-delimited user input into typed identifiers. Classification is
//! a pure string transformation and never fails.

use serde::{Deserialize, Serialize};
use std::fmt;

const VCS_HOST: &str = "github.com";
const VCS_MARKER: &str = "github.com/";
const OFFICIAL_SCOPE: &str = "@modelcontextprotocol/";
const OFFICIAL_SERVER_PREFIX: &str = "@modelcontextprotocol/server-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierKind {
    /// A repository URL on the VCS host; identifier is `owner/repo`
    VcsUrl,
    /// A package under the official MCP registry scope
    RegistryScopedPackage,
    RegistryPackage,
    /// Anything else; resolved through search
    PlainName,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentifierKind::VcsUrl => "github_url",
            IdentifierKind::RegistryScopedPackage => "npm_official",
            IdentifierKind::RegistryPackage => "npm_package",
            IdentifierKind::PlainName => "name",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedIdentifier {
    pub original: String,
    pub kind: IdentifierKind,
    pub identifier: String,
    pub display_name: Option<String>,
}

impl ClassifiedIdentifier {
    /// Name to show the user: the display name when known, else the identifier
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

/// Classify every non-blank line of `input`, preserving order.
pub fn classify_input(input: &str) -> Vec<ClassifiedIdentifier> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(classify_line)
        .collect()
}

/// Classify one trimmed, non-empty line.
pub fn classify_line(line: &str) -> ClassifiedIdentifier {
    let original = line.to_string();

    if line.contains(VCS_HOST) {
        let tail = line
            .rsplit_once(VCS_MARKER)
            .map(|(_, tail)| tail)
            .unwrap_or(line);
        return ClassifiedIdentifier {
            original,
            kind: IdentifierKind::VcsUrl,
            identifier: tail.trim_end_matches('/').to_string(),
            display_name: None,
        };
    }

    if line.starts_with('@') || !line.contains('/') {
        if line.starts_with(OFFICIAL_SCOPE) {
            let display = line.strip_prefix(OFFICIAL_SERVER_PREFIX).unwrap_or(line);
            return ClassifiedIdentifier {
                original,
                kind: IdentifierKind::RegistryScopedPackage,
                identifier: line.to_string(),
                display_name: Some(display.to_string()),
            };
        }

        let display = line.rsplit('/').next().unwrap_or(line);
        return ClassifiedIdentifier {
            original,
            kind: IdentifierKind::RegistryPackage,
            identifier: line.to_string(),
            display_name: Some(display.to_string()),
        };
    }

    ClassifiedIdentifier {
        original,
        kind: IdentifierKind::PlainName,
        identifier: line.to_string(),
        display_name: Some(line.to_string()),
    }
}
