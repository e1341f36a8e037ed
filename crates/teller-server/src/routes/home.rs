use axum::{response::Html, routing::get, Router};

const HOMEPAGE: &str = "\
<h1>Financial Assistant API</h1>
<p>Send a POST request to <code>/chat</code> to interact with the assistant.</p>
";

async fn home() -> Html<&'static str> {
    Html(HOMEPAGE)
}

pub fn routes() -> Router {
    Router::new().route("/", get(home))
}
