use std::sync::Arc;
use tokio::sync::Mutex;

use super::types::AttentionEvent;

/// Append-only, insertion-ordered event log.
///
/// Cloning the handle shares the same log. Entries are never mutated or
/// removed once appended; readers take a snapshot copy and may iterate it
/// while the session actor keeps appending.
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<AttentionEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, event: AttentionEvent) {
        let mut entries = self.entries.lock().await;
        entries.push(event);
    }

    pub async fn extend(&self, events: Vec<AttentionEvent>) {
        if events.is_empty() {
            return;
        }
        let mut entries = self.entries.lock().await;
        entries.extend(events);
    }

    /// Copy of the log so far, safe to reduce while appends continue.
    pub async fn snapshot(&self) -> Vec<AttentionEvent> {
        let entries = self.entries.lock().await;
        entries.clone()
    }

    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
