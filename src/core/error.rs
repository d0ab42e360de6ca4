//! Domain errors

use std::fmt;

/// Kind of entity an identifier failed to resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Agent,
    Campaign,
    Run,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Agent => "agent",
            Resource::Campaign => "campaign",
            Resource::Run => "run",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: Resource, id: String },
}

impl ConsoleError {
    pub fn not_found(resource: Resource, id: impl Into<String>) -> Self {
        ConsoleError::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConsoleError::NotFound { .. })
    }
}

pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;
