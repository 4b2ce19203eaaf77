//! MCP discovery pipeline
//!
//! raw text → [`input::classify_input`] → [`DiscoveryOrchestrator`] → resolver
//! (GitHub, npm or search) → [`analyzer::ToolAnalyzer`] + [`scoring::Scorer`]
//! → [`McpMetadata`] → [`crate::registry::RegistryStore`].

pub mod analyzer;
pub mod error;
pub mod input;
pub mod orchestrator;
pub mod resolvers;
pub mod scoring;
pub mod types;

pub use error::{DiscoveryError, DiscoveryResult};
pub use input::{classify_input, ClassifiedIdentifier, IdentifierKind};
pub use orchestrator::{DiscoveryOrchestrator, DiscoveryReport, ItemOutcome};
pub use scoring::{CredentialDetector, CredentialRule, Scorer};
pub use types::{
    CredentialRequirement, IntegrationFormat, McpMetadata, ParameterDescriptor, SourceKind,
    ToolDescriptor,
};
