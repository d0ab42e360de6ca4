//! VoxFlow HTTP API client

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::source::RunSource;
use crate::store::models::{Agent, AgentPatch, Campaign, CampaignRun, LogEntry, Stats};

/// Client for the `/api` endpoints
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new()); // Fallback if config fails

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn stats(&self) -> Result<Stats> {
        let response = self
            .client
            .get(self.url("/api/stats"))
            .send()
            .await
            .context("Failed to fetch stats")?;
        required(response).await
    }

    pub async fn list_agents(&self) -> Result<Vec<Agent>> {
        let response = self
            .client
            .get(self.url("/api/agents"))
            .send()
            .await
            .context("Failed to list agents")?;
        required(response).await
    }

    pub async fn get_agent(&self, id: &str) -> Result<Option<Agent>> {
        let response = self
            .client
            .get(self.url(&format!("/api/agents/{}", id)))
            .send()
            .await
            .context("Failed to get agent")?;
        optional(response).await
    }

    pub async fn create_agent(&self, fields: &AgentPatch) -> Result<Agent> {
        let response = self
            .client
            .post(self.url("/api/agents"))
            .json(fields)
            .send()
            .await
            .context("Failed to create agent")?;
        required(response).await
    }

    pub async fn update_agent(&self, id: &str, fields: &AgentPatch) -> Result<Option<Agent>> {
        let response = self
            .client
            .put(self.url(&format!("/api/agents/{}", id)))
            .json(fields)
            .send()
            .await
            .context("Failed to update agent")?;
        optional(response).await
    }

    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let response = self
            .client
            .get(self.url("/api/campaigns"))
            .send()
            .await
            .context("Failed to list campaigns")?;
        required(response).await
    }

    pub async fn start_campaign(&self, campaign_id: &str) -> Result<Option<CampaignRun>> {
        self.post_run(&format!("/api/campaigns/{}/start", campaign_id))
            .await
            .context("Failed to start campaign")
    }

    pub async fn pause_run(&self, run_id: &str) -> Result<Option<CampaignRun>> {
        self.post_run(&format!("/api/campaigns/{}/pause", run_id))
            .await
            .context("Failed to pause run")
    }

    pub async fn stop_run(&self, run_id: &str) -> Result<Option<CampaignRun>> {
        self.post_run(&format!("/api/campaigns/{}/stop", run_id))
            .await
            .context("Failed to stop run")
    }

    pub async fn list_logs(&self) -> Result<Vec<LogEntry>> {
        let response = self
            .client
            .get(self.url("/api/logs"))
            .send()
            .await
            .context("Failed to list logs")?;
        required(response).await
    }

    async fn post_run(&self, path: &str) -> Result<Option<CampaignRun>> {
        debug!("POST {}", path);
        let response = self.client.post(self.url(path)).send().await?;
        optional(response).await
    }
}

#[async_trait]
impl RunSource for ApiClient {
    async fn run_status(&self, run_id: &str) -> Result<Option<CampaignRun>> {
        let response = self
            .client
            .get(self.url(&format!("/api/campaigns/{}/status", run_id)))
            .send()
            .await
            .context("Failed to fetch run status")?;
        optional(response).await
    }
}

/// Decode a body, treating 404 as absent
async fn optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    required(response).await.map(Some)
}

async fn required<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("VoxFlow API error: {} - {}", status, body);
    }

    response
        .json()
        .await
        .context("Failed to parse VoxFlow response")
}
