use std::sync::Arc;

use teller::agent::Agent;

/// Shared application state. The agent (and the provider inside it) is
/// built once at startup and injected into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }
}
