//! Console client: HTTP API access and run polling

pub mod http;
pub mod poller;
pub mod source;

pub use http::ApiClient;
pub use poller::{PollOutcome, RunPoller, TranscriptView};
pub use source::RunSource;
