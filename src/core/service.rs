//! Transport-independent console service
//!
//! One method per addressable operation. Handlers, the CLI and tests all
//! call through here; artificial latency is applied by the HTTP layer only.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::error::{ConsoleError, ConsoleResult, Resource};
use crate::campaign::{AdvanceMode, RunLifecycle, Script};
use crate::client::source::RunSource;
use crate::store::models::{Agent, AgentPatch, Campaign, CampaignRun, LogEntry, Stats};
use crate::store::repositories::{AgentRepository, CampaignRepository, LogRepository};
use crate::store::Store;

pub struct ConsoleService {
    agents: AgentRepository,
    campaigns: CampaignRepository,
    logs: LogRepository,
    lifecycle: Arc<RunLifecycle>,
    advance_mode: AdvanceMode,
}

impl ConsoleService {
    pub fn new(store: Store, script: Script, per_advance: usize, advance_mode: AdvanceMode) -> Self {
        Self {
            agents: AgentRepository::new(store.clone()),
            campaigns: CampaignRepository::new(store.clone()),
            logs: LogRepository::new(store.clone()),
            lifecycle: Arc::new(RunLifecycle::new(store, script, per_advance)),
            advance_mode,
        }
    }

    /// Demo script, two messages per status read
    pub fn with_defaults(store: Store) -> Self {
        Self::new(store, Script::demo(), 2, AdvanceMode::OnRead)
    }

    pub fn lifecycle(&self) -> Arc<RunLifecycle> {
        Arc::clone(&self.lifecycle)
    }

    pub fn advance_mode(&self) -> AdvanceMode {
        self.advance_mode
    }

    pub async fn stats(&self) -> Stats {
        self.logs.stats().await
    }

    pub async fn list_agents(&self) -> Vec<Agent> {
        self.agents.list().await
    }

    pub async fn get_agent(&self, id: &str) -> ConsoleResult<Agent> {
        self.agents
            .get(id)
            .await
            .ok_or_else(|| ConsoleError::not_found(Resource::Agent, id))
    }

    pub async fn create_agent(&self, fields: AgentPatch) -> Agent {
        self.agents.create(fields).await
    }

    pub async fn update_agent(&self, id: &str, fields: AgentPatch) -> ConsoleResult<Agent> {
        self.agents.update(id, fields).await
    }

    pub async fn list_campaigns(&self) -> Vec<Campaign> {
        self.campaigns.list().await
    }

    pub async fn start_campaign(&self, campaign_id: &str) -> ConsoleResult<CampaignRun> {
        self.lifecycle.start(campaign_id).await
    }

    /// Current run state. In `on_read` mode this also advances the run.
    pub async fn run_status(&self, run_id: &str) -> ConsoleResult<CampaignRun> {
        match self.advance_mode {
            AdvanceMode::OnRead => self.lifecycle.advance(run_id).await,
            AdvanceMode::Background => self.lifecycle.get(run_id).await,
        }
    }

    pub async fn pause_run(&self, run_id: &str) -> ConsoleResult<CampaignRun> {
        self.lifecycle.pause(run_id).await
    }

    pub async fn stop_run(&self, run_id: &str) -> ConsoleResult<CampaignRun> {
        self.lifecycle.stop(run_id).await
    }

    pub async fn list_logs(&self) -> Vec<LogEntry> {
        self.logs.list().await
    }
}

#[async_trait]
impl RunSource for ConsoleService {
    async fn run_status(&self, run_id: &str) -> Result<Option<CampaignRun>> {
        match ConsoleService::run_status(self, run_id).await {
            Ok(run) => Ok(Some(run)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
