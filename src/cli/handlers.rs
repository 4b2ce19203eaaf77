//! Command handlers
//!
//! Each handler returns the process exit code. Per-item discovery failures are
//! reported but never change the exit code; only usage problems and missing
//! prerequisite state do.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::commands::{DiscoverArgs, ListArgs, ShowArgs};
use super::output::{ConsoleProgress, OutputFormatter};
use crate::config::{ConfigError, McmConfig};
use crate::discovery::{classify_input, DiscoveryOrchestrator, DiscoveryReport, Scorer};
use crate::home::McmHome;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::progress::{LoggingHandler, ProgressHandler};

pub const NO_INDEX_MESSAGE: &str = "No MCPs discovered yet. Run 'mcm discover' first.";

pub fn handle_discover(args: &DiscoverArgs, config: &McmConfig, home: &McmHome, quiet: bool) -> i32 {
    let config = match discover_config(args, config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };
    let config = &config;

    let input = match read_input(&args.input_file) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let http = match ReqwestHttpClient::new(config.request_timeout()) {
        Ok(client) => Arc::new(client) as Arc<dyn HttpClient>,
        Err(e) => {
            error!("Failed to create HTTP client: {:#}", e);
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let progress: Arc<dyn ProgressHandler> = if quiet {
        Arc::new(LoggingHandler)
    } else {
        Arc::new(ConsoleProgress::stdout())
    };

    discover(&input, config, home, http, progress, quiet);
    0
}

/// `config` with the `--delay-ms` override applied, validated by the same rules
fn discover_config(args: &DiscoverArgs, config: &McmConfig) -> Result<McmConfig, ConfigError> {
    let mut config = config.clone();
    if let Some(delay_ms) = args.delay_ms {
        config.request_delay = Duration::from_millis(delay_ms);
    }
    config.validate()?;
    Ok(config)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))
}

/// Classify `input` and run every identifier through the orchestrator
pub fn discover(
    input: &str,
    config: &McmConfig,
    home: &McmHome,
    http: Arc<dyn HttpClient>,
    progress: Arc<dyn ProgressHandler>,
    quiet: bool,
) -> DiscoveryReport {
    let identifiers = classify_input(input);
    if !quiet {
        println!("Found {} MCPs to discover\n", identifiers.len());
    }
    debug!(count = identifiers.len(), "Classified input");

    let settings = match home.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Using default settings: {}", e);
            Default::default()
        }
    };
    let scorer = Scorer::new(settings.credential_detector());

    let orchestrator = DiscoveryOrchestrator::new(config, http, scorer).with_progress(progress);

    let report = orchestrator.run(&identifiers, &home.registry());
    info!(
        discovered = report.discovered(),
        failed = report.failed(),
        "Discovery finished"
    );
    report
}

pub fn handle_list(args: &ListArgs, home: &McmHome) -> i32 {
    let index = match home.registry().load_index() {
        Ok(Some(index)) => index,
        Ok(None) => {
            println!("{}", NO_INDEX_MESSAGE);
            return 1;
        }
        Err(e) => {
            error!("Failed to read registry index: {}", e);
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_index(&index.mcps) {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_show(args: &ShowArgs, home: &McmHome) -> i32 {
    let metadata = match home.registry().get(&args.name) {
        Ok(Some(metadata)) => metadata,
        Ok(None) => {
            eprintln!("No MCP named '{}' in the registry", args.name);
            return 1;
        }
        Err(e) => {
            error!("Failed to read record for {}: {}", args.name, e);
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let formatter = OutputFormatter::new(args.format.into());
    match formatter.format_metadata(&metadata) {
        Ok(output) => {
            println!("{}", output.trim_end());
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
