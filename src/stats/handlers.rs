use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{service::StatsService, DamageStatsRow, KdaWinrateRow, TopVictimsRow};
use crate::shared::{AppError, AppState};

/// HTTP handler for the KDA and win rate table
///
/// GET /kda-winrate
/// Returns one row per player, best KDA first
#[instrument(name = "kda_winrate", skip(state))]
pub async fn kda_winrate(
    State(state): State<AppState>,
) -> Result<Json<Vec<KdaWinrateRow>>, AppError> {
    let service = StatsService::new(Arc::clone(&state.round_repository));
    let rows = service.kda_winrate().await?;

    info!(row_count = rows.len(), "KDA and win rate computed");
    Ok(Json(rows))
}

/// HTTP handler for each player's most frequent victims
///
/// GET /top-victims
#[instrument(name = "top_victims", skip(state))]
pub async fn top_victims(
    State(state): State<AppState>,
) -> Result<Json<Vec<TopVictimsRow>>, AppError> {
    let service = StatsService::new(Arc::clone(&state.round_repository));
    let rows = service.top_victims().await?;

    info!(row_count = rows.len(), "Top victims computed");
    Ok(Json(rows))
}

/// HTTP handler for headshot accuracy and percentile
///
/// GET /damage-stats
#[instrument(name = "damage_stats", skip(state))]
pub async fn damage_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<DamageStatsRow>>, AppError> {
    let service = StatsService::new(Arc::clone(&state.round_repository));
    let rows = service.damage_stats().await?;

    info!(row_count = rows.len(), "Damage stats computed");
    Ok(Json(rows))
}
