use std::time::Duration;

/// Connection settings for an OpenAI-compatible completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    /// Applied to every outbound request; both calls of a tool round-trip
    /// are bounded individually.
    pub timeout: Duration,
}
