//! Demo data loaded into a fresh store

use chrono::Utc;
use uuid::Uuid;

use super::models::{
    Agent, Campaign, CampaignStatus, FlowStep, LogCategory, LogEntry, StepKind,
};
use super::state::StoreState;

pub fn demo_state() -> StoreState {
    let now = Utc::now();

    let support = Agent {
        id: Uuid::new_v4().to_string(),
        name: "Customer Support Assistant".to_string(),
        language: "English".to_string(),
        description: "Handles customer inquiries and support tickets".to_string(),
        flow_steps: vec![
            FlowStep::new(StepKind::Prompt, "Hello! How can I help you today?", 0),
            FlowStep::new(StepKind::Intent, "Identify customer issue", 1),
        ],
        created_at: now,
        updated_at: now,
    };

    let sales = Agent {
        id: Uuid::new_v4().to_string(),
        name: "Sales Qualifier".to_string(),
        language: "English".to_string(),
        description: "Qualifies leads and schedules demos".to_string(),
        flow_steps: vec![FlowStep::new(
            StepKind::Prompt,
            "Hi! Tell me about your business needs.",
            0,
        )],
        created_at: now,
        updated_at: now,
    };

    let outreach = Campaign {
        id: Uuid::new_v4().to_string(),
        name: "Q1 Customer Outreach".to_string(),
        agent_id: support.id.clone(),
        agent_name: support.name.clone(),
        status: CampaignStatus::Idle,
        created_at: now,
    };

    let mut state = StoreState::default();
    // append_log pushes to the front, so push in reverse display order
    state.append_log(LogEntry::new(
        LogCategory::Campaign,
        "Campaign Created",
        format!("{} campaign was created", outreach.name),
    ));
    state.append_log(LogEntry::new(
        LogCategory::Agent,
        "Agent Created",
        format!("{} was created", support.name),
    ));
    state.agents = vec![support, sales];
    state.campaigns = vec![outreach];
    state
}
