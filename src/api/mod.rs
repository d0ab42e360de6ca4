//! HTTP API over the console service

pub mod handlers;
pub mod latency;
pub mod router;
pub mod server;

pub use latency::Latency;
pub use router::build_router;
pub use server::ApiServer;
