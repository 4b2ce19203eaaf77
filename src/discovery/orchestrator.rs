//! Discovery orchestration
//!
//! Runs classified identifiers through their resolvers one at a time, saving
//! each result to the registry. A failing identifier is logged and recorded in
//! the report; it never stops the batch.

use crate::config::McmConfig;
use crate::discovery::error::DiscoveryResult;
use crate::discovery::input::{ClassifiedIdentifier, IdentifierKind};
use crate::discovery::resolvers::{
    vcs_repo_path, GitHubResolver, RegistryResolver, SearchResolver,
};
use crate::discovery::scoring::Scorer;
use crate::discovery::types::{IntegrationFormat, McpMetadata};
use crate::http::HttpClient;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::registry::RegistryStore;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// What happened to one identifier
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Discovered {
        identifier: String,
        name: String,
        tool_count: usize,
        format: IntegrationFormat,
    },
    /// The resolver found nothing to record
    NotFound { identifier: String },
    /// The resolver failed
    Failed { identifier: String, error: String },
    /// Resolution succeeded but the record could not be written
    SaveFailed {
        identifier: String,
        name: String,
        error: String,
    },
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Discovered { .. })
    }

    pub fn identifier(&self) -> &str {
        match self {
            ItemOutcome::Discovered { identifier, .. }
            | ItemOutcome::NotFound { identifier }
            | ItemOutcome::Failed { identifier, .. }
            | ItemOutcome::SaveFailed { identifier, .. } => identifier,
        }
    }

    fn progress_event(&self, index: usize, total: usize) -> ProgressEvent {
        let (identifier, reason) = match self {
            ItemOutcome::Discovered {
                name,
                tool_count,
                format,
                ..
            } => {
                return ProgressEvent::ItemDiscovered {
                    index,
                    total,
                    name: name.clone(),
                    tool_count: *tool_count,
                    format: *format,
                }
            }
            ItemOutcome::NotFound { identifier } => (identifier, "no result".to_string()),
            ItemOutcome::Failed { identifier, error } => (identifier, error.clone()),
            ItemOutcome::SaveFailed {
                identifier, error, ..
            } => (identifier, format!("save failed: {}", error)),
        };

        ProgressEvent::ItemFailed {
            index,
            total,
            identifier: identifier.clone(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryReport {
    pub outcomes: Vec<ItemOutcome>,
}

impl DiscoveryReport {
    pub fn discovered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.discovered()
    }
}

pub struct DiscoveryOrchestrator {
    github: Arc<GitHubResolver>,
    registry: RegistryResolver,
    search: SearchResolver,
    delay: Duration,
    progress: Arc<dyn ProgressHandler>,
}

impl DiscoveryOrchestrator {
    pub fn new(config: &McmConfig, http: Arc<dyn HttpClient>, scorer: Scorer) -> Self {
        let github = Arc::new(GitHubResolver::new(
            http.clone(),
            config.github_token.clone(),
            Arc::new(scorer),
        ));

        Self {
            registry: RegistryResolver::new(http.clone(), github.clone()),
            search: SearchResolver::new(http, github.clone(), config.search_api_key.clone()),
            github,
            delay: config.request_delay,
            progress: Arc::new(NoOpHandler),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressHandler>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Resolve one identifier with the resolver for its kind.
    ///
    /// `Ok(None)` means the resolver ran but found nothing to record.
    pub fn resolve(&self, id: &ClassifiedIdentifier) -> DiscoveryResult<Option<McpMetadata>> {
        match id.kind {
            IdentifierKind::VcsUrl => {
                let repo_path =
                    vcs_repo_path(&id.original).unwrap_or_else(|| id.identifier.clone());
                self.github.resolve(&repo_path).map(Some)
            }
            IdentifierKind::RegistryScopedPackage | IdentifierKind::RegistryPackage => {
                self.registry.resolve(&id.identifier).map(Some)
            }
            IdentifierKind::PlainName => self.search.resolve(&id.identifier),
        }
    }

    /// Resolve and save every identifier in order, pausing between items.
    pub fn run(&self, identifiers: &[ClassifiedIdentifier], store: &RegistryStore) -> DiscoveryReport {
        let started = Instant::now();
        let total = identifiers.len();
        let mut report = DiscoveryReport::default();

        self.progress.on_progress(&ProgressEvent::BatchStarted { total });

        for (i, id) in identifiers.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }

            let index = i + 1;
            self.progress.on_progress(&ProgressEvent::ItemStarted {
                index,
                total,
                identifier: id.identifier.clone(),
            });

            let outcome = self.discover_one(id, store);
            self.progress.on_progress(&outcome.progress_event(index, total));
            report.outcomes.push(outcome);
        }

        self.progress.on_progress(&ProgressEvent::BatchCompleted {
            discovered: report.discovered(),
            failed: report.failed(),
            elapsed: started.elapsed(),
        });

        report
    }

    fn discover_one(&self, id: &ClassifiedIdentifier, store: &RegistryStore) -> ItemOutcome {
        let identifier = id.identifier.clone();
        info!(identifier = %identifier, kind = %id.kind, "Discovering");

        let metadata = match self.resolve(id) {
            Ok(Some(metadata)) => metadata,
            Ok(None) => {
                warn!(identifier = %identifier, "Discovery found nothing");
                return ItemOutcome::NotFound { identifier };
            }
            Err(e) => {
                error!(identifier = %identifier, error = %e, "Discovery failed");
                return ItemOutcome::Failed {
                    identifier,
                    error: e.to_string(),
                };
            }
        };

        match store.upsert(&metadata) {
            Ok(_) => ItemOutcome::Discovered {
                identifier,
                name: metadata.name,
                tool_count: metadata.tool_count,
                format: metadata.format,
            },
            Err(e) => {
                error!(identifier = %identifier, name = %metadata.name, error = %e, "Failed to save metadata");
                ItemOutcome::SaveFailed {
                    identifier,
                    name: metadata.name,
                    error: e.to_string(),
                }
            }
        }
    }
}
