//! Run status source trait

use anyhow::Result;
use async_trait::async_trait;

use crate::store::models::CampaignRun;

/// Anything the poller can ask for a run's current state: the HTTP API or
/// an in-process service
#[async_trait]
pub trait RunSource: Send + Sync {
    /// Fetch the run. `Ok(None)` means the run does not exist.
    async fn run_status(&self, run_id: &str) -> Result<Option<CampaignRun>>;
}
