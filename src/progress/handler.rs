//! Progress handler trait and events

use crate::discovery::types::IntegrationFormat;
use std::time::Duration;

/// Events emitted while a discovery batch runs.
///
/// `index` is 1-based.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    BatchStarted {
        total: usize,
    },

    ItemStarted {
        index: usize,
        total: usize,
        identifier: String,
    },

    ItemDiscovered {
        index: usize,
        total: usize,
        name: String,
        tool_count: usize,
        format: IntegrationFormat,
    },

    ItemFailed {
        index: usize,
        total: usize,
        identifier: String,
        reason: String,
    },

    BatchCompleted {
        discovered: usize,
        failed: usize,
        elapsed: Duration,
    },
}

/// Trait for handling progress events during discovery
pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_noop_handler() {
        NoOpHandler.on_progress(&ProgressEvent::BatchStarted { total: 1 });
    }

    #[test]
    fn test_progress_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler {
            count: count.clone(),
        };

        handler.on_progress(&ProgressEvent::BatchStarted { total: 1 });
        handler.on_progress(&ProgressEvent::ItemStarted {
            index: 1,
            total: 1,
            identifier: "a/b".to_string(),
        });
        handler.on_progress(&ProgressEvent::BatchCompleted {
            discovered: 1,
            failed: 0,
            elapsed: Duration::from_secs(2),
        });

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_event_debug() {
        let event = ProgressEvent::BatchStarted { total: 4 };
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("BatchStarted"));
        assert!(debug_str.contains("total: 4"));
    }
}
