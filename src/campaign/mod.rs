//! Campaign runs: demo script, lifecycle, ticker and transcript export

pub mod lifecycle;
pub mod script;
pub mod ticker;
pub mod transcript;

pub use lifecycle::{AdvanceMode, RunLifecycle};
pub use script::Script;
