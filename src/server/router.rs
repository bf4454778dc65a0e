use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::server::handlers::chat;
use crate::state::AppState;

/// Application router: the two chat routes, the static landing page, CORS
/// and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get-message", post(chat::get_message))
        .route(
            "/clear-memory",
            get(chat::clear_memory).post(chat::clear_memory),
        )
        .fallback_service(ServeDir::new(&state.static_dir))
        .with_state(state)
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// The chat widget is embedded on storefront pages, so cross-origin POSTs
/// are expected.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
}
