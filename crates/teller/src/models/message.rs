use serde::{Deserialize, Serialize};

use super::role::Role;
use super::tool::ToolCall;

/// A single chat message in the completion service's wire format.
///
/// Optional fields are omitted from the serialized form when absent, so a
/// conversation parses and re-serializes without change. `content` is
/// absent only on assistant messages that are pure tool-call directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool identity, set on tool-result messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Correlates a tool result to the call that requested it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Tool-call directives, present only on assistant messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    fn new(role: Role) -> Self {
        Message {
            role,
            content: None,
            name: None,
            tool_call_id: None,
            tool_calls: None,
        }
    }

    /// Create a system instruction message
    pub fn system<S: Into<String>>(text: S) -> Self {
        let mut message = Message::new(Role::System);
        message.content = Some(text.into());
        message
    }

    /// Create a user message
    pub fn user<S: Into<String>>(text: S) -> Self {
        let mut message = Message::new(Role::User);
        message.content = Some(text.into());
        message
    }

    /// Create an assistant message with text content
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        let mut message = Message::new(Role::Assistant);
        message.content = Some(text.into());
        message
    }

    /// Create an assistant message that is a pure tool-call directive
    pub fn tool_call_directive(calls: Vec<ToolCall>) -> Self {
        let mut message = Message::new(Role::Assistant);
        message.tool_calls = Some(calls);
        message
    }

    /// Create a tool-result message carrying the stringified output of a
    /// tool invocation, correlated to the call that requested it
    pub fn tool_result<I, N, C>(call_id: I, name: N, content: C) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut message = Message::new(Role::Tool);
        message.content = Some(content.into());
        message.name = Some(name.into());
        message.tool_call_id = Some(call_id.into());
        message
    }

    /// Get the text content if present
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The first tool-call directive, if the message carries any. Later
    /// entries are never acted on.
    pub fn first_tool_call(&self) -> Option<&ToolCall> {
        self.tool_calls.as_deref().and_then(|calls| calls.first())
    }
}
