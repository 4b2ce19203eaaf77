//! Output formatting for the registry listing and stored records
//!
//! Listing and `show` output come in two formats: pretty JSON for scripts and
//! human-readable text. Live discovery progress is printed by
//! [`ConsoleProgress`].

use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Mutex;

use crate::discovery::types::McpMetadata;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::registry::RegistryIndexEntry;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the registry summary index
    pub fn format_index(&self, entries: &[RegistryIndexEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(entries)
                .context("Failed to serialize registry index to JSON"),
            OutputFormat::Human => Ok(self.format_index_human(entries)),
        }
    }

    /// Formats one stored record
    pub fn format_metadata(&self, metadata: &McpMetadata) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(metadata)
                .context("Failed to serialize MCP metadata to JSON"),
            OutputFormat::Human => Ok(self.format_metadata_human(metadata)),
        }
    }

    fn format_index_human(&self, entries: &[RegistryIndexEntry]) -> String {
        let mut output = format!("Discovered MCPs ({})\n{}\n", entries.len(), RULE);

        let width = entries
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0);

        for entry in entries {
            output.push_str(&format!(
                "{:<width$}  {:>3} tools  {:<11}  {:<6}  {}\n",
                entry.name,
                entry.tool_count,
                entry.format.to_string(),
                entry.source.to_string(),
                entry.discovered_at.format("%Y-%m-%d %H:%M"),
                width = width
            ));
        }

        output
    }

    fn format_metadata_human(&self, metadata: &McpMetadata) -> String {
        let mut output = format!("{}\n{}\n\n", metadata.name, RULE);

        output.push_str(&format!("Source:        {}\n", metadata.source));
        output.push_str(&format!("URL:           {}\n", metadata.url));
        if !metadata.description.is_empty() {
            output.push_str(&format!("Description:   {}\n", metadata.description));
        }
        output.push_str(&format!("Format:        {}\n", metadata.format));
        output.push_str(&format!("Complexity:    {:.2}\n", metadata.complexity_score));
        output.push_str(&format!(
            "Context Cost:  ~{} tokens\n",
            metadata.context_cost_estimate
        ));
        output.push_str(&format!(
            "Discovered:    {}\n\n",
            metadata.discovered_at.to_rfc3339()
        ));

        output.push_str(&format!("Tools ({}):\n", metadata.tool_count));
        push_tree(&mut output, metadata.tools.iter().map(|t| t.name.as_str()));

        if !metadata.credentials_needed.is_empty() {
            output.push_str("\nCredentials:\n");
            push_tree(
                &mut output,
                metadata
                    .credentials_needed
                    .iter()
                    .map(|c| format!("{} ({})", c.name, c.url)),
            );
        }

        if !metadata.dependencies.is_empty() {
            output.push_str(&format!(
                "\nDependencies:  {}\n",
                metadata.dependencies.join(", ")
            ));
        }

        output
    }
}

fn push_tree<I, S>(output: &mut String, items: I)
where
    I: ExactSizeIterator<Item = S>,
    S: AsRef<str>,
{
    let len = items.len();
    for (i, item) in items.enumerate() {
        let connector = if i + 1 == len { "\u{2514}" } else { "\u{251C}" };
        output.push_str(&format!("{}\u{2500} {}\n", connector, item.as_ref()));
    }
}

/// Prints per-item discovery progress and the closing summary
pub struct ConsoleProgress<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleProgress<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn render(event: &ProgressEvent) -> Option<String> {
        match event {
            ProgressEvent::BatchStarted { .. } => None,
            ProgressEvent::ItemStarted {
                index,
                total,
                identifier,
            } => Some(format!("[{}/{}] Discovering {}...", index, total, identifier)),
            ProgressEvent::ItemDiscovered {
                name,
                tool_count,
                format,
                ..
            } => Some(format!(
                "  \u{2713} {}: {} tools, format: {}",
                name, tool_count, format
            )),
            ProgressEvent::ItemFailed { .. } => Some("  \u{2717} Failed to discover".to_string()),
            ProgressEvent::BatchCompleted {
                discovered,
                failed,
                elapsed,
            } => Some(format!(
                "\nDiscovery complete: {} discovered, {} failed ({:.1}s)",
                discovered,
                failed,
                elapsed.as_secs_f64()
            )),
        }
    }
}

impl<W: Write + Send> ProgressHandler for ConsoleProgress<W> {
    fn on_progress(&self, event: &ProgressEvent) {
        let Some(line) = Self::render(event) else {
            return;
        };
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }
}
