use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::base::{Provider, ProviderError, Usage};
use crate::models::{Message, Tool};

/// A scripted provider for tests. Responses are handed out in order, and
/// every conversation it is asked to complete is recorded so tests can
/// assert call counts and message appension.
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Message>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// One observed call to `complete`.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tool_count: usize,
}

impl MockProvider {
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[Tool],
    ) -> Result<(Message, Usage), ProviderError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            tool_count: tools.len(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return an empty response if no more pre-configured responses
            Ok((Message::assistant(""), Usage::default()))
        } else {
            Ok((responses.remove(0), Usage::default()))
        }
    }
}
