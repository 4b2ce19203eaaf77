//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::BatchStarted { total } => {
                info!(total, "Starting discovery");
            }
            ProgressEvent::ItemStarted {
                index,
                total,
                identifier,
            } => {
                debug!(
                    identifier = %identifier,
                    progress = format!("{}/{}", index, total),
                    "Discovering"
                );
            }
            ProgressEvent::ItemDiscovered {
                index,
                total,
                name,
                tool_count,
                format,
            } => {
                info!(
                    name = %name,
                    tool_count,
                    format = %format,
                    progress = format!("{}/{}", index, total),
                    "Discovered"
                );
            }
            ProgressEvent::ItemFailed {
                index,
                total,
                identifier,
                reason,
            } => {
                warn!(
                    identifier = %identifier,
                    reason = %reason,
                    progress = format!("{}/{}", index, total),
                    "Discovery failed"
                );
            }
            ProgressEvent::BatchCompleted {
                discovered,
                failed,
                elapsed,
            } => {
                info!(
                    discovered,
                    failed,
                    elapsed_ms = elapsed.as_millis(),
                    "Discovery complete"
                );
            }
        }
    }
}
