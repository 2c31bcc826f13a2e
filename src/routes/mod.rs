mod probes;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router: the chat page, its assets, the websocket
/// endpoint and a few operational probes.
pub fn router(state: AppState) -> Router {
    let index = ServeFile::new(&state.index_path);
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route_service("/", index)
        .nest_service("/static", assets)
        .route("/ws", get(crate::gateway::ws_upgrade))
        .route("/health", get(probes::health))
        .route("/stats", get(probes::stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
