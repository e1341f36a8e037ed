use anyhow::Result;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

mod configuration;
mod error;
mod routes;
mod state;

use configuration::Settings;
use state::AppState;
use teller::agent::Agent;
use teller::providers::openai::OpenAiProvider;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    // Missing credentials abort here, before the listener binds
    let settings = Settings::new()?;
    let addr = settings.server.socket_addr();

    let provider = OpenAiProvider::new(settings.provider.into_config())?;
    let mut agent = Agent::new(Box::new(provider));
    if let Some(steering) = settings.agent.steering {
        agent = agent.with_steering(steering);
    }

    // Allow any frontend origin to talk to the relay
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(AppState::new(agent)).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
