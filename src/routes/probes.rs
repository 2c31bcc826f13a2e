//! Operational endpoints for load balancers and dashboards.

use axum::extract::State;
use axum::Json;

use crate::gateway::registry::RegistryStats;
use crate::state::AppState;

/// Liveness probe. Answers while the registry lock can be taken.
pub async fn health(State(state): State<AppState>) -> &'static str {
    let _ = state.registry.stats();
    "ok"
}

pub async fn stats(State(state): State<AppState>) -> Json<RegistryStats> {
    Json(state.registry.stats())
}
