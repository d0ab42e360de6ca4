//! Run status polling
//!
//! Re-reads a run at a fixed interval until it leaves `running`. No backoff:
//! a failed poll is simply retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use super::source::RunSource;
use crate::store::models::{CampaignRun, RunStatus, TranscriptMessage};

/// How a watch ended
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Last snapshot, no longer running (completed or paused)
    Settled(CampaignRun),
    /// The run does not exist (any more)
    Missing,
}

pub struct RunPoller {
    source: Arc<dyn RunSource>,
    interval: Duration,
    max_failures: u32,
}

impl RunPoller {
    pub fn new(source: Arc<dyn RunSource>, interval: Duration) -> Self {
        Self {
            source,
            interval,
            max_failures: 5,
        }
    }

    /// Give up after this many consecutive failed polls
    pub fn with_max_failures(mut self, max_failures: u32) -> Self {
        self.max_failures = max_failures.max(1);
        self
    }

    /// Poll `run_id` until it settles, handing every snapshot to
    /// `on_snapshot`. Dropping the future stops polling.
    pub async fn watch<F>(&self, run_id: &str, mut on_snapshot: F) -> Result<PollOutcome>
    where
        F: FnMut(&CampaignRun) + Send,
    {
        let mut failures = 0;

        loop {
            match self.source.run_status(run_id).await {
                Ok(Some(run)) => {
                    failures = 0;
                    debug!(
                        "Run {} is {} with {} messages",
                        run_id,
                        run.status.as_str(),
                        run.transcript.len()
                    );
                    on_snapshot(&run);
                    if !run.is_running() {
                        return Ok(PollOutcome::Settled(run));
                    }
                }
                Ok(None) => {
                    warn!("Run {} not found, stopping poll", run_id);
                    return Ok(PollOutcome::Missing);
                }
                Err(e) => {
                    failures += 1;
                    warn!("Poll {} of run {} failed: {:#}", failures, run_id, e);
                    if failures >= self.max_failures {
                        return Err(e.context(format!(
                            "Giving up on run {} after {} failed polls",
                            run_id, failures
                        )));
                    }
                }
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Display list fed by poll snapshots
#[derive(Debug, Default)]
pub struct TranscriptView {
    messages: Vec<TranscriptMessage>,
    status: Option<RunStatus>,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take in a snapshot and return the messages not seen before.
    /// Transcripts are append-only, so anything past the current length is new.
    pub fn apply(&mut self, run: &CampaignRun) -> Vec<TranscriptMessage> {
        let fresh: Vec<TranscriptMessage> = run
            .transcript
            .iter()
            .skip(self.messages.len())
            .cloned()
            .collect();
        self.messages.extend(fresh.iter().cloned());
        self.status = Some(run.status);
        fresh
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    pub fn status(&self) -> Option<RunStatus> {
        self.status
    }
}
