//! Per-entity repositories over the shared store

pub mod agent;
pub mod campaign;
pub mod log;

pub use agent::AgentRepository;
pub use campaign::CampaignRepository;
pub use log::LogRepository;
