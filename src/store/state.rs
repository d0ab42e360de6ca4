//! Shared in-memory state
//!
//! All collections live behind one async mutex. Every operation that touches
//! a run's status or transcript does so while holding the lock, so two
//! concurrent status reads can never append the same script lines twice.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::models::{Agent, Campaign, CampaignRun, LogEntry};
use super::seed;

/// Canonical collections. Logs are kept newest-first.
#[derive(Debug, Default)]
pub struct StoreState {
    pub agents: Vec<Agent>,
    pub campaigns: Vec<Campaign>,
    pub runs: HashMap<String, CampaignRun>,
    pub logs: VecDeque<LogEntry>,
}

impl StoreState {
    /// Record a log entry at the front of the log
    pub fn append_log(&mut self, entry: LogEntry) {
        tracing::debug!("Log [{}] {}: {}", entry.category.as_str(), entry.title, entry.description);
        self.logs.push_front(entry);
    }

    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: &str) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn campaign_mut(&mut self, id: &str) -> Option<&mut Campaign> {
        self.campaigns.iter_mut().find(|c| c.id == id)
    }
}

/// Handle to the entity store. Cloning shares the same state.
pub struct Store {
    state: Arc<Mutex<StoreState>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    /// Create a store preloaded with the demo agents, campaign and log entries
    pub fn seeded() -> Self {
        let state = seed::demo_state();
        info!(
            "Store seeded with {} agents, {} campaigns",
            state.agents.len(),
            state.campaigns.len()
        );
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Get locked state
    ///
    /// Hold the guard only for the duration of a single operation.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, StoreState> {
        self.state.lock().await
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
