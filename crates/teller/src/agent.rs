use serde_json::Value;
use tracing::debug;

use crate::errors::{AgentError, AgentResult};
use crate::models::Message;
use crate::providers::base::Provider;
use crate::toolkit::Toolkit;

/// Drives one chat turn against the completion service, resolving at most
/// one tool call locally before the final reply.
pub struct Agent {
    provider: Box<dyn Provider>,
    toolkit: Toolkit,
    steering: Option<String>,
}

impl Agent {
    /// Create a new Agent around an injected completion gateway
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self {
            provider,
            toolkit: Toolkit::new(),
            steering: None,
        }
    }

    /// Prepend a system instruction to the follow-up call issued after a
    /// tool result. Disabled unless configured.
    pub fn with_steering<S: Into<String>>(mut self, text: S) -> Self {
        self.steering = Some(text.into());
        self
    }

    /// Produce the final reply for the conversation.
    ///
    /// At most one tool call is executed and at most two completion
    /// requests are issued per turn. If the first response carries several
    /// tool-call directives only the first is executed, and directives in
    /// the follow-up response are not processed. A reply may legally carry
    /// no text, surfaced as `None`.
    pub async fn reply(&self, messages: &[Message]) -> AgentResult<Option<String>> {
        let tools = self.toolkit.tools();
        let (response, _usage) = self.provider.complete(messages, &tools).await?;

        let call = match response.first_tool_call() {
            Some(call) => call.clone(),
            None => return Ok(response.content),
        };

        debug!(tool = %call.function.name, id = %call.id, "dispatching tool call");

        let args: Value = serde_json::from_str(&call.function.arguments)
            .map_err(|e| AgentError::MalformedArguments(format!("tool call {}: {e}", call.id)))?;
        let result = self.toolkit.dispatch(&call.function.name, &args)?;

        let rendered = match result {
            Value::String(text) => text,
            other => other.to_string(),
        };

        let mut conversation = messages.to_vec();
        conversation.push(response);
        conversation.push(Message::tool_result(
            call.id,
            call.function.name,
            rendered,
        ));
        if let Some(text) = &self.steering {
            conversation.insert(0, Message::system(text));
        }

        // Second call resolves the tool result into prose; the tool schema
        // is not offered again.
        let (follow_up, _usage) = self.provider.complete(&conversation, &[]).await?;
        Ok(follow_up.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, Tool, ToolCall};
    use crate::providers::base::{ProviderError, Usage};
    use crate::providers::mock::MockProvider;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;

    fn mortgage_directive() -> Message {
        Message::tool_call_directive(vec![ToolCall::function(
            "call_1",
            "calculate_mortgage",
            json!({"principal": 120000.0, "rate": 0.0, "years": 10}),
        )])
    }

    #[tokio::test]
    async fn test_plain_text_reply_uses_one_call() -> Result<()> {
        let provider = MockProvider::new(vec![Message::assistant("Hello!")]);
        let agent = Agent::new(Box::new(provider.clone()));

        let reply = agent.reply(&[Message::user("Hi")]).await?;

        assert_eq!(reply.as_deref(), Some("Hello!"));
        assert_eq!(provider.call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_tool_round_trip() -> Result<()> {
        let provider = MockProvider::new(vec![
            mortgage_directive(),
            Message::assistant("Your payment is $1000 per month."),
        ]);
        let agent = Agent::new(Box::new(provider.clone()));

        let history = vec![Message::user("What would I pay monthly?")];
        let reply = agent.reply(&history).await?;

        assert_eq!(reply.as_deref(), Some("Your payment is $1000 per month."));

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].tool_count, 3);
        // Tool schema is omitted on the follow-up call
        assert_eq!(requests[1].tool_count, 0);

        // Exactly two messages were appended: the directive and its result
        let follow_up = &requests[1].messages;
        assert_eq!(follow_up.len(), history.len() + 2);
        assert_eq!(follow_up[1], mortgage_directive());

        let result = &follow_up[2];
        assert_eq!(result.role, Role::Tool);
        assert_eq!(result.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(result.name.as_deref(), Some("calculate_mortgage"));
        assert_eq!(result.text(), Some("1000.0"));
        Ok(())
    }

    #[tokio::test]
    async fn test_only_first_directive_is_executed() -> Result<()> {
        let provider = MockProvider::new(vec![
            Message::tool_call_directive(vec![
                ToolCall::function("call_1", "convert_currency", json!({"amount": 10.0, "rate": 2.0})),
                ToolCall::function("call_2", "calculate_mortgage", json!({})),
            ]),
            Message::assistant("Done."),
        ]);
        let agent = Agent::new(Box::new(provider.clone()));

        agent.reply(&[Message::user("Convert for me")]).await?;

        let requests = provider.requests();
        let follow_up = &requests[1].messages;
        assert_eq!(follow_up.len(), 3);
        assert_eq!(follow_up[2].name.as_deref(), Some("convert_currency"));
        assert_eq!(follow_up[2].text(), Some("20.0"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_tool_fails_before_second_call() -> Result<()> {
        let provider = MockProvider::new(vec![Message::tool_call_directive(vec![
            ToolCall::function("call_1", "transfer_funds", json!({})),
        ])]);
        let agent = Agent::new(Box::new(provider.clone()));

        let result = agent.reply(&[Message::user("Send money")]).await;

        assert!(matches!(result, Err(AgentError::ToolNotFound(_))));
        assert_eq!(provider.call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_arguments_fail_before_second_call() -> Result<()> {
        let provider = MockProvider::new(vec![Message::tool_call_directive(vec![ToolCall {
            id: "call_1".to_string(),
            call_type: "function".to_string(),
            function: crate::models::FunctionCall {
                name: "calculate_mortgage".to_string(),
                arguments: "not json {".to_string(),
            },
        }])]);
        let agent = Agent::new(Box::new(provider.clone()));

        let result = agent.reply(&[Message::user("Mortgage?")]).await;

        assert!(matches!(result, Err(AgentError::MalformedArguments(_))));
        assert_eq!(provider.call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_domain_error_surfaces() -> Result<()> {
        let provider = MockProvider::new(vec![Message::tool_call_directive(vec![
            ToolCall::function(
                "call_1",
                "calculate_mortgage",
                json!({"principal": 200000.0, "rate": 5.0, "years": 0}),
            ),
        ])]);
        let agent = Agent::new(Box::new(provider.clone()));

        let result = agent.reply(&[Message::user("Zero-year mortgage?")]).await;

        assert!(matches!(result, Err(AgentError::ExecutionError(_))));
        assert_eq!(provider.call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_steering_prepends_system_message() -> Result<()> {
        let provider = MockProvider::new(vec![mortgage_directive(), Message::assistant("Done.")]);
        let agent = Agent::new(Box::new(provider.clone())).with_steering("Answer in one sentence.");

        agent.reply(&[Message::user("Mortgage?")]).await?;

        let follow_up = &provider.requests()[1].messages;
        assert_eq!(follow_up[0], Message::system("Answer in one sentence."));
        assert_eq!(follow_up[1], Message::user("Mortgage?"));
        Ok(())
    }

    #[tokio::test]
    async fn test_no_steering_by_default() -> Result<()> {
        let provider = MockProvider::new(vec![mortgage_directive(), Message::assistant("Done.")]);
        let agent = Agent::new(Box::new(provider.clone()));

        agent.reply(&[Message::user("Mortgage?")]).await?;

        let follow_up = &provider.requests()[1].messages;
        assert_eq!(follow_up[0], Message::user("Mortgage?"));
        Ok(())
    }

    #[tokio::test]
    async fn test_follow_up_directives_are_ignored() -> Result<()> {
        let provider = MockProvider::new(vec![mortgage_directive(), mortgage_directive()]);
        let agent = Agent::new(Box::new(provider.clone()));

        let reply = agent.reply(&[Message::user("Mortgage?")]).await?;

        // The second directive carries no text and is not dispatched
        assert_eq!(reply, None);
        assert_eq!(provider.call_count(), 2);
        Ok(())
    }

    struct FailingProvider;

    #[async_trait]
    impl Provider for FailingProvider {
        async fn complete(
            &self,
            _messages: &[Message],
            _tools: &[Tool],
        ) -> Result<(Message, Usage), ProviderError> {
            Err(ProviderError::Response("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let agent = Agent::new(Box::new(FailingProvider));
        let result = agent.reply(&[Message::user("Hi")]).await;
        assert!(matches!(result, Err(AgentError::Provider(_))));
    }
}
