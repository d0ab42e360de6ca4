//! Activity log repository

use crate::store::models::{LogEntry, Stats};
use crate::store::Store;

pub struct LogRepository {
    store: Store,
}

impl LogRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All entries, most recent first
    pub async fn list(&self) -> Vec<LogEntry> {
        self.store.lock().await.logs.iter().cloned().collect()
    }

    pub async fn append(&self, entry: LogEntry) {
        self.store.lock().await.append_log(entry);
    }

    /// Entity counts
    pub async fn stats(&self) -> Stats {
        let state = self.store.lock().await;
        Stats {
            agents: state.agents.len(),
            campaigns: state.campaigns.len(),
            logs: state.logs.len(),
        }
    }
}
