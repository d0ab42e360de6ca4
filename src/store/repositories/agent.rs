//! Agent repository

use chrono::Utc;
use uuid::Uuid;

use crate::agent::flow;
use crate::core::error::{ConsoleError, ConsoleResult, Resource};
use crate::store::models::{Agent, AgentPatch, LogCategory, LogEntry};
use crate::store::Store;

pub const DEFAULT_AGENT_NAME: &str = "Untitled Agent";
pub const DEFAULT_LANGUAGE: &str = "English";

pub struct AgentRepository {
    store: Store,
}

impl AgentRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List all agents in creation order
    pub async fn list(&self) -> Vec<Agent> {
        self.store.lock().await.agents.clone()
    }

    /// Get an agent by ID
    pub async fn get(&self, id: &str) -> Option<Agent> {
        self.store.lock().await.agent(id).cloned()
    }

    /// Create an agent, filling unset or empty name and language with defaults
    pub async fn create(&self, fields: AgentPatch) -> Agent {
        let now = Utc::now();
        let mut flow_steps = fields.flow_steps.unwrap_or_default();
        flow::normalize(&mut flow_steps);

        let agent = Agent {
            id: Uuid::new_v4().to_string(),
            name: non_empty(fields.name).unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string()),
            language: non_empty(fields.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            description: fields.description.unwrap_or_default(),
            flow_steps,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.store.lock().await;
        state.agents.push(agent.clone());
        state.append_log(LogEntry::new(
            LogCategory::Agent,
            "Agent Created",
            format!("{} was created", agent.name),
        ));

        tracing::debug!("Created agent: {}", agent.id);
        agent
    }

    /// Merge `fields` into an existing agent. The ID and creation time are kept.
    pub async fn update(&self, id: &str, fields: AgentPatch) -> ConsoleResult<Agent> {
        let mut state = self.store.lock().await;
        let agent = state
            .agent_mut(id)
            .ok_or_else(|| ConsoleError::not_found(Resource::Agent, id))?;

        if let Some(name) = fields.name {
            agent.name = name;
        }
        if let Some(language) = fields.language {
            agent.language = language;
        }
        if let Some(description) = fields.description {
            agent.description = description;
        }
        if let Some(mut steps) = fields.flow_steps {
            flow::normalize(&mut steps);
            agent.flow_steps = steps;
        }
        agent.updated_at = Utc::now();

        let updated = agent.clone();
        state.append_log(LogEntry::new(
            LogCategory::Agent,
            "Agent Updated",
            format!("{} was updated", updated.name),
        ));

        tracing::debug!("Updated agent: {}", id);
        Ok(updated)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
