//! Error types for the Mission Control dashboard service
//!
//! This module provides structured error handling using thiserror for
//! error definitions and anyhow for error propagation at the edges.

use thiserror::Error;

/// Main error type for Mission Control operations
#[derive(Error, Debug)]
pub enum MissionControlError {
    /// Task lookup by id failed
    #[error("Task not found: {0}")]
    TaskNotFound(u32),

    /// Agent lookup by key failed
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Memory lookup by id failed
    #[error("Memory not found: {0}")]
    MemoryNotFound(u32),

    /// Analytics API request failed
    #[error("Analytics error: {0}")]
    Analytics(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl MissionControlError {
    /// Whether this error should surface as a 404-equivalent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MissionControlError::TaskNotFound(_)
                | MissionControlError::AgentNotFound(_)
                | MissionControlError::MemoryNotFound(_)
        )
    }
}

/// Result type alias for Mission Control operations
pub type Result<T> = std::result::Result<T, MissionControlError>;

/// Convert anyhow::Error to MissionControlError
impl From<anyhow::Error> for MissionControlError {
    fn from(err: anyhow::Error) -> Self {
        MissionControlError::Other(err.to_string())
    }
}
