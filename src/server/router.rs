use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::server::{
    controller::{health::get_health, webhook::post_link_webhook},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_health))
        .route("/webhook/link", post(post_link_webhook))
        .layer(TraceLayer::new_for_http())
}
