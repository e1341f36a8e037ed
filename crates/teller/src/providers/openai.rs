use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use async_trait::async_trait;

use super::base::{Provider, ProviderError, Usage};
use super::configs::OpenAiProviderConfig;
use super::utils::{
    check_context_length_error, response_to_message, tools_to_openai_spec, usage_from_response,
};
use crate::models::{Message, Tool};

/// Completion gateway for OpenAI-compatible chat endpoints.
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, payload: Value) -> Result<Value, ProviderError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => {
                let message = response.text().await.unwrap_or_default();
                Err(ProviderError::Status {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[Tool],
    ) -> Result<(Message, Usage), ProviderError> {
        let mut payload = json!({
            "model": self.config.model,
            "messages": messages,
        });

        let body = payload.as_object_mut().unwrap();
        if !tools.is_empty() {
            body.insert("tools".to_string(), json!(tools_to_openai_spec(tools)));
            body.insert("tool_choice".to_string(), json!("auto"));
        }
        if let Some(temperature) = self.config.temperature {
            body.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(max_tokens) = self.config.max_tokens {
            body.insert("max_tokens".to_string(), json!(max_tokens));
        }

        let response = self.post(payload).await?;

        if let Some(error) = response.get("error") {
            if let Some(message) = check_context_length_error(error) {
                return Err(ProviderError::ContextLengthExceeded(message));
            }
            return Err(ProviderError::Api(error.to_string()));
        }

        let message = response_to_message(&response)?;
        let usage = usage_from_response(&response);

        Ok((message, usage))
    }
}
