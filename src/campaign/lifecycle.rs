//! Campaign run state machine
//!
//! ```text
//! start ──> running ──(script exhausted)──> completed
//!              │  └────────(stop)──────────────^
//!              └─(pause)─> paused ──(stop)──────^
//! ```
//!
//! The transition functions operate on an already locked [`StoreState`], so
//! a run's status, transcript and completion time only ever change under
//! the store lock. [`RunLifecycle`] wraps them with the locking.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::script::Script;
use crate::core::error::{ConsoleError, ConsoleResult, Resource};
use crate::store::models::{
    CampaignRun, CampaignStatus, LogCategory, LogEntry, RunStatus, TranscriptMessage,
};
use crate::store::{Store, StoreState};

/// When running transcripts grow
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceMode {
    /// Each status read advances the run it reads
    #[default]
    OnRead,
    /// A background ticker advances every running run; reads are pure
    Background,
}

/// Create a running run for a campaign and mark the campaign running
pub fn start_run(state: &mut StoreState, campaign_id: &str) -> ConsoleResult<CampaignRun> {
    let campaign = state
        .campaign_mut(campaign_id)
        .ok_or_else(|| ConsoleError::not_found(Resource::Campaign, campaign_id))?;

    campaign.status = CampaignStatus::Running;
    let campaign_name = campaign.name.clone();

    let run = CampaignRun {
        id: Uuid::new_v4().to_string(),
        campaign_id: campaign.id.clone(),
        agent_name: campaign.agent_name.clone(),
        status: RunStatus::Running,
        transcript: Vec::new(),
        started_at: Utc::now(),
        completed_at: None,
    };

    state.runs.insert(run.id.clone(), run.clone());
    state.append_log(LogEntry::new(
        LogCategory::Campaign,
        "Campaign Started",
        format!("{} demo started", campaign_name),
    ));

    info!("Started run {} for campaign {}", run.id, campaign_id);
    Ok(run)
}

/// Append up to `per_advance` unseen script lines to a running run.
///
/// Completes the run (and its campaign) once the whole script has been
/// delivered. No-op unless the run is `running`. Returns the run after the
/// step.
pub fn advance_run(
    state: &mut StoreState,
    run_id: &str,
    script: &Script,
    per_advance: usize,
) -> ConsoleResult<CampaignRun> {
    let run = state
        .runs
        .get_mut(run_id)
        .ok_or_else(|| ConsoleError::not_found(Resource::Run, run_id))?;

    if run.status != RunStatus::Running || run.transcript.len() >= script.len() {
        return Ok(run.clone());
    }

    let next = run.transcript.len();
    let end = (next + per_advance).min(script.len());
    for line in &script.lines()[next..end] {
        run.transcript.push(TranscriptMessage {
            id: Uuid::new_v4().to_string(),
            role: line.role,
            content: line.content.clone(),
            timestamp: Utc::now(),
        });
    }
    debug!("Run {} advanced to {}/{} messages", run_id, end, script.len());

    if run.transcript.len() < script.len() {
        return Ok(run.clone());
    }

    run.status = RunStatus::Completed;
    run.completed_at = Some(Utc::now());
    let snapshot = run.clone();

    if let Some(campaign) = state.campaign_mut(&snapshot.campaign_id) {
        campaign.status = CampaignStatus::Completed;
    }
    state.append_log(LogEntry::new(
        LogCategory::Campaign,
        "Campaign Completed",
        format!("Demo completed with {} messages", snapshot.transcript.len()),
    ));

    info!("Run {} completed", run_id);
    Ok(snapshot)
}

/// Set a run to `paused` regardless of its current status. The transcript
/// and the owning campaign are left alone.
pub fn pause_run(state: &mut StoreState, run_id: &str) -> ConsoleResult<CampaignRun> {
    let run = state
        .runs
        .get_mut(run_id)
        .ok_or_else(|| ConsoleError::not_found(Resource::Run, run_id))?;

    run.status = RunStatus::Paused;
    info!("Paused run {}", run_id);
    Ok(run.clone())
}

/// Complete a run from any status and propagate to its campaign.
/// Unlike natural completion this records no log entry.
pub fn stop_run(state: &mut StoreState, run_id: &str) -> ConsoleResult<CampaignRun> {
    let run = state
        .runs
        .get_mut(run_id)
        .ok_or_else(|| ConsoleError::not_found(Resource::Run, run_id))?;

    run.status = RunStatus::Completed;
    run.completed_at = Some(Utc::now());
    let snapshot = run.clone();

    if let Some(campaign) = state.campaign_mut(&snapshot.campaign_id) {
        campaign.status = CampaignStatus::Completed;
    }

    info!(
        "Stopped run {} with {} messages",
        run_id,
        snapshot.transcript.len()
    );
    Ok(snapshot)
}

/// Run lifecycle over a shared store
pub struct RunLifecycle {
    store: Store,
    script: Arc<Script>,
    per_advance: usize,
}

impl RunLifecycle {
    pub fn new(store: Store, script: Script, per_advance: usize) -> Self {
        Self {
            store,
            script: Arc::new(script),
            // Zero would stall every run forever
            per_advance: per_advance.max(1),
        }
    }

    pub async fn start(&self, campaign_id: &str) -> ConsoleResult<CampaignRun> {
        let mut state = self.store.lock().await;
        start_run(&mut state, campaign_id)
    }

    /// Read a run without advancing it
    pub async fn get(&self, run_id: &str) -> ConsoleResult<CampaignRun> {
        let state = self.store.lock().await;
        state
            .runs
            .get(run_id)
            .cloned()
            .ok_or_else(|| ConsoleError::not_found(Resource::Run, run_id))
    }

    pub async fn advance(&self, run_id: &str) -> ConsoleResult<CampaignRun> {
        let mut state = self.store.lock().await;
        advance_run(&mut state, run_id, &self.script, self.per_advance)
    }

    /// Advance every running run once. Returns how many were advanced.
    pub async fn advance_all(&self) -> usize {
        let mut state = self.store.lock().await;
        let running: Vec<String> = state
            .runs
            .values()
            .filter(|run| run.is_running())
            .map(|run| run.id.clone())
            .collect();

        for run_id in &running {
            if let Err(e) = advance_run(&mut state, run_id, &self.script, self.per_advance) {
                warn!("Failed to advance run {}: {}", run_id, e);
            }
        }
        running.len()
    }

    pub async fn pause(&self, run_id: &str) -> ConsoleResult<CampaignRun> {
        let mut state = self.store.lock().await;
        pause_run(&mut state, run_id)
    }

    pub async fn stop(&self, run_id: &str) -> ConsoleResult<CampaignRun> {
        let mut state = self.store.lock().await;
        stop_run(&mut state, run_id)
    }
}
