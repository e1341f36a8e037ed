use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::state::AppState;
use teller::errors::AgentError;
use teller::models::Message;

#[derive(Debug, Deserialize)]
struct ChatRequest {
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    reply: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    match state.agent.reply(&request.messages).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })).into_response(),
        Err(err) => {
            error!("chat turn failed: {err}");
            (
                status_for(&err),
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn status_for(err: &AgentError) -> StatusCode {
    match err {
        AgentError::Provider(_) => StatusCode::BAD_GATEWAY,
        AgentError::ToolNotFound(_)
        | AgentError::InvalidParameters(_)
        | AgentError::MalformedArguments(_)
        | AgentError::ExecutionError(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new().route("/chat", post(chat)).with_state(state)
}
