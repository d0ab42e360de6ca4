//! HTTP handlers
//!
//! Each handler waits out its configured latency, then calls the service.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::latency::Operation;
use crate::core::error::ConsoleError;
use crate::core::state::AppState;
use crate::store::models::{Agent, AgentPatch, Campaign, CampaignRun, LogEntry, Stats};

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConsoleError::NotFound { .. } => StatusCode::NOT_FOUND,
        };
        tracing::debug!("{}", self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ConsoleError>;

pub async fn get_stats(State(state): State<AppState>) -> Json<Stats> {
    state.latency.wait(Operation::Stats).await;
    Json(state.service.stats().await)
}

pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<Agent>> {
    state.latency.wait(Operation::ListAgents).await;
    Json(state.service.list_agents().await)
}

pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Agent>> {
    state.latency.wait(Operation::GetAgent).await;
    Ok(Json(state.service.get_agent(&id).await?))
}

pub async fn create_agent(
    State(state): State<AppState>,
    Json(fields): Json<AgentPatch>,
) -> (StatusCode, Json<Agent>) {
    state.latency.wait(Operation::CreateAgent).await;
    let agent = state.service.create_agent(fields).await;
    (StatusCode::CREATED, Json(agent))
}

pub async fn update_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<AgentPatch>,
) -> ApiResult<Json<Agent>> {
    state.latency.wait(Operation::UpdateAgent).await;
    Ok(Json(state.service.update_agent(&id, fields).await?))
}

pub async fn list_campaigns(State(state): State<AppState>) -> Json<Vec<Campaign>> {
    state.latency.wait(Operation::ListCampaigns).await;
    Json(state.service.list_campaigns().await)
}

pub async fn start_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<CampaignRun>)> {
    state.latency.wait(Operation::StartCampaign).await;
    let run = state.service.start_campaign(&id).await?;
    Ok((StatusCode::CREATED, Json(run)))
}

pub async fn run_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> ApiResult<Json<CampaignRun>> {
    state.latency.wait(Operation::RunStatus).await;
    Ok(Json(state.service.run_status(&run_id).await?))
}

pub async fn pause_run(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> ApiResult<Json<CampaignRun>> {
    state.latency.wait(Operation::PauseRun).await;
    Ok(Json(state.service.pause_run(&run_id).await?))
}

pub async fn stop_run(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> ApiResult<Json<CampaignRun>> {
    state.latency.wait(Operation::StopRun).await;
    Ok(Json(state.service.stop_run(&run_id).await?))
}

pub async fn list_logs(State(state): State<AppState>) -> Json<Vec<LogEntry>> {
    state.latency.wait(Operation::ListLogs).await;
    Json(state.service.list_logs().await)
}
