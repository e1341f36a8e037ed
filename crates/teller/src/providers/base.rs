use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Message, Tool};

/// Token accounting reported by the completion service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request to completion service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("completion service error: {0}")]
    Api(String),

    #[error("context length exceeded: {0}")]
    ContextLengthExceeded(String),

    #[error("unexpected completion response: {0}")]
    Response(String),
}

/// Gateway to a hosted completion service.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Request the next assistant message for the conversation, offering
    /// `tools` to the model when the slice is non-empty.
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[Tool],
    ) -> Result<(Message, Usage), ProviderError>;
}
