//! API server

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use super::router::build_router;
use crate::campaign::{ticker, AdvanceMode};
use crate::core::state::AppState;

pub struct ApiServer {
    addr: String,
    state: AppState,
    tick_interval: std::time::Duration,
}

impl ApiServer {
    pub fn new(addr: impl Into<String>, state: AppState, tick_interval: std::time::Duration) -> Self {
        Self {
            addr: addr.into(),
            state,
            tick_interval,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;

        self.serve(listener).await
    }

    /// Serve on an already bound listener until ctrl-c
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        tracing::info!("VoxFlow API listening on {}", self.addr);

        let ticker = match self.state.service.advance_mode() {
            AdvanceMode::Background => Some(ticker::spawn(
                self.state.service.lifecycle(),
                self.tick_interval,
            )),
            AdvanceMode::OnRead => None,
        };

        let app = build_router(self.state.clone());
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        if let Some(handle) = ticker {
            handle.abort();
        }
        served.context("API server error")?;

        tracing::info!("VoxFlow API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
