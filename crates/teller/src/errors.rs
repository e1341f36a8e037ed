use thiserror::Error;

use crate::providers::base::ProviderError;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Malformed tool arguments: {0}")]
    MalformedArguments(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),

    #[error("Completion request failed: {0}")]
    Provider(#[from] ProviderError),
}

pub type AgentResult<T> = Result<T, AgentError>;
