use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::instrument;

use crate::shared::{AppError, AppState};
use crate::stats::handlers::{damage_stats, kda_winrate, top_victims};

/// Builds the HTTP surface over the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/kda-winrate", get(kda_winrate))
        .route("/top-victims", get(top_victims))
        .route("/damage-stats", get(damage_stats))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Valorant Round Data API" }))
}

/// GET /health
/// Reports the number of stored rounds; fails when the store is unreachable
#[instrument(name = "health", skip(state))]
async fn health(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let rounds = state.round_repository.count_rounds().await?;
    Ok(Json(json!({ "status": "ok", "rounds": rounds })))
}

async fn not_found() -> AppError {
    AppError::NotFound("No such endpoint".to_string())
}
