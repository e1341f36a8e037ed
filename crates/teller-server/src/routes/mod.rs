// Export route modules
pub mod chat;
pub mod home;

use axum::Router;

use crate::state::AppState;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(home::routes())
        .merge(chat::routes(state))
}
