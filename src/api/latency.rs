//! Artificial response latency
//!
//! Emulates network delay so clients can observe pending states. Has no
//! effect on results; the whole policy can be disabled.

use std::time::Duration;

use crate::config::LatencyConfig;

/// Addressable API operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Stats,
    ListAgents,
    GetAgent,
    CreateAgent,
    UpdateAgent,
    ListCampaigns,
    StartCampaign,
    RunStatus,
    PauseRun,
    StopRun,
    ListLogs,
}

#[derive(Debug, Clone)]
pub struct Latency {
    config: Option<LatencyConfig>,
}

impl Latency {
    pub fn from_config(config: &LatencyConfig) -> Self {
        Self {
            config: config.enabled.then(|| config.clone()),
        }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self { config: None }
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        let Some(c) = &self.config else {
            return Duration::ZERO;
        };

        let ms = match op {
            Operation::Stats => c.stats_ms,
            Operation::ListAgents => c.list_agents_ms,
            Operation::GetAgent => c.get_agent_ms,
            Operation::CreateAgent => c.create_agent_ms,
            Operation::UpdateAgent => c.update_agent_ms,
            Operation::ListCampaigns => c.list_campaigns_ms,
            Operation::StartCampaign => c.start_campaign_ms,
            Operation::RunStatus => c.run_status_ms,
            Operation::PauseRun => c.pause_run_ms,
            Operation::StopRun => c.stop_run_ms,
            Operation::ListLogs => c.list_logs_ms,
        };
        Duration::from_millis(ms)
    }

    /// Sleep for the operation's delay. Dropping the future cancels it.
    pub async fn wait(&self, op: Operation) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
