//! Background advance of running campaign runs

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::lifecycle::RunLifecycle;

/// Spawn a task that advances every running run once per `period`.
/// Abort the returned handle to stop it.
pub fn spawn(lifecycle: Arc<RunLifecycle>, period: Duration) -> JoinHandle<()> {
    tracing::info!("Run ticker started ({:?} period)", period);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; runs start with an empty transcript
        interval.tick().await;

        loop {
            interval.tick().await;
            let advanced = lifecycle.advance_all().await;
            if advanced > 0 {
                tracing::debug!("Ticker advanced {} running runs", advanced);
            }
        }
    })
}
