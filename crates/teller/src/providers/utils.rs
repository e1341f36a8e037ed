use serde_json::{json, Value};

use super::base::{ProviderError, Usage};
use crate::models::{Message, Tool};

/// Convert tool descriptors to the service's function-calling schema.
pub fn tools_to_openai_spec(tools: &[Tool]) -> Vec<Value> {
    tools
        .iter()
        .map(|tool| {
            json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                }
            })
        })
        .collect()
}

/// Interpret the service response as the next assistant message.
pub fn response_to_message(response: &Value) -> Result<Message, ProviderError> {
    let message = response
        .pointer("/choices/0/message")
        .ok_or_else(|| ProviderError::Response("missing choices[0].message".to_string()))?;

    serde_json::from_value(message.clone())
        .map_err(|e| ProviderError::Response(format!("could not decode assistant message: {e}")))
}

/// Pull token counts out of the response, tolerating absent fields.
pub fn usage_from_response(response: &Value) -> Usage {
    let usage = match response.get("usage") {
        Some(usage) => usage,
        None => return Usage::default(),
    };

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);
    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);
    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Usage::new(input_tokens, output_tokens, total_tokens)
}

/// Detect the service's context-length error codes inside an error object.
pub fn check_context_length_error(error: &Value) -> Option<String> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(message)
    } else {
        None
    }
}
