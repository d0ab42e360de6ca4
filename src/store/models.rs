//! Entity types held by the store

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A configurable voice-conversation definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub language: String,
    pub description: String,
    pub flow_steps: Vec<FlowStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One node of an agent's script. Incoming steps without an id get a fresh
/// one; a missing `order` sorts first until the flow is normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowStep {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(flatten)]
    pub body: StepBody,
    #[serde(default)]
    pub order: usize,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Step payload, discriminated by the `type` field on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepBody {
    /// Text shown to the caller
    Prompt { content: String },
    /// Classification rule description
    Intent { content: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Prompt,
    Intent,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Prompt => "prompt",
            StepKind::Intent => "intent",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "prompt" => Ok(StepKind::Prompt),
            "intent" => Ok(StepKind::Intent),
            _ => anyhow::bail!("Unknown step type: {}", s),
        }
    }
}

impl StepBody {
    pub fn new(kind: StepKind, content: impl Into<String>) -> Self {
        let content = content.into();
        match kind {
            StepKind::Prompt => StepBody::Prompt { content },
            StepKind::Intent => StepBody::Intent { content },
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            StepBody::Prompt { .. } => StepKind::Prompt,
            StepBody::Intent { .. } => StepKind::Intent,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            StepBody::Prompt { content } | StepBody::Intent { content } => content,
        }
    }

    pub fn set_content(&mut self, text: impl Into<String>) {
        match self {
            StepBody::Prompt { content } | StepBody::Intent { content } => *content = text.into(),
        }
    }
}

impl FlowStep {
    pub fn new(kind: StepKind, content: impl Into<String>, order: usize) -> Self {
        Self {
            id: new_id(),
            body: StepBody::new(kind, content),
            order,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.body.kind()
    }

    pub fn content(&self) -> &str {
        self.body.content()
    }
}

/// Fields accepted when creating or updating an agent. Absent fields keep
/// their defaults (create) or current values (update).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_steps: Option<Vec<FlowStep>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub agent_id: String,
    /// Cached for display; re-resolve `agent_id` for the live agent
    pub agent_name: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Idle,
    Running,
    Completed,
    Paused,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Idle => "idle",
            CampaignStatus::Running => "running",
            CampaignStatus::Completed => "completed",
            CampaignStatus::Paused => "paused",
        }
    }
}

/// One execution of a campaign's demo conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRun {
    pub id: String,
    pub campaign_id: String,
    pub agent_name: String,
    pub status: RunStatus,
    pub transcript: Vec<TranscriptMessage>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl CampaignRun {
    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Paused,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Paused => "paused",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// Audit record of a platform event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub category: LogCategory,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(
        category: LogCategory,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category,
            title: title.into(),
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    /// Case-insensitive substring match on title or description
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Agent,
    Campaign,
    System,
}

impl LogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Agent => "agent",
            LogCategory::Campaign => "campaign",
            LogCategory::System => "system",
        }
    }
}

/// Entity counts for the dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub agents: usize,
    pub campaigns: usize,
    pub logs: usize,
}

/// Keep only the entries matching `query`; an empty query keeps everything
pub fn filter_logs(logs: Vec<LogEntry>, query: &str) -> Vec<LogEntry> {
    if query.trim().is_empty() {
        return logs;
    }
    logs.into_iter().filter(|log| log.matches(query)).collect()
}
