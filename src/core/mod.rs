//! Service layer shared by every transport

pub mod error;
pub mod service;
pub mod state;

pub use error::{ConsoleError, ConsoleResult, Resource};
pub use service::ConsoleService;
pub use state::AppState;
