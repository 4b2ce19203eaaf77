//! mcm - MCP context manager
//!
//! Discovers third-party MCP integration packages from GitHub URLs, npm
//! package names or bare names, estimates the size and cost of each one's tool
//! surface, and records the results in a local registry.
//!
//! # Pipeline
//!
//! raw text → [`discovery::classify_input`] → [`DiscoveryOrchestrator`] →
//! resolver (GitHub, npm or search) → tool analyzer → [`Scorer`] →
//! [`RegistryStore::upsert`]
//!
//! # Example Usage
//!
//! ```no_run
//! use mcm::discovery::classify_input;
//! use mcm::http::ReqwestHttpClient;
//! use mcm::{DiscoveryOrchestrator, McmConfig, McmHome, Scorer};
//! use std::sync::Arc;
//!
//! let config = McmConfig::default();
//! let home = McmHome::new(&config.home);
//! home.ensure_directories()?;
//!
//! let http = Arc::new(ReqwestHttpClient::new(config.request_timeout())?);
//! let orchestrator = DiscoveryOrchestrator::new(&config, http, Scorer::default());
//!
//! let ids = classify_input("https://github.com/modelcontextprotocol/servers");
//! let report = orchestrator.run(&ids, &home.registry());
//! println!("{} discovered", report.discovered());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Project Structure
//!
//! - [`discovery`]: classification, resolvers, tool analysis and scoring
//! - [`registry`]: on-disk record store and summary index
//! - [`home`]: directory layout and persisted settings
//! - [`http`]: blocking HTTP seam with a real and a mock client

pub mod cli;
pub mod config;
pub mod discovery;
pub mod home;
pub mod http;
pub mod progress;
pub mod registry;
pub mod util;

pub use config::{ConfigError, McmConfig};
pub use discovery::{
    classify_input, DiscoveryError, DiscoveryOrchestrator, DiscoveryReport, McpMetadata, Scorer,
};
pub use home::{HomeError, McmHome, Settings};
pub use registry::{PersistenceError, RegistryIndexEntry, RegistryStore};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
