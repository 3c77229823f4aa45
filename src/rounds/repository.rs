use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::models::{RoundRecord, RoundRow};
use crate::shared::AppError;

// Postgres caps bind parameters at 65535 per statement; seven columns per row
const INSERT_CHUNK_SIZE: usize = 5000;

/// Trait for round record store operations
#[async_trait]
pub trait RoundRepository {
    /// Returns every stored round; rows without a player id are skipped
    async fn fetch_rounds(&self) -> Result<Vec<RoundRecord>, AppError>;
    async fn count_rounds(&self) -> Result<u64, AppError>;

    /// Replaces the whole store with `rounds`, returning the number written
    async fn replace_rounds(&self, rounds: Vec<RoundRecord>) -> Result<u64, AppError>;
}

/// In-memory implementation of RoundRepository for development and testing
///
/// Data is lost when the application restarts; seed it from a CSV export
/// with [`crate::rounds::ingest::load_csv`].
#[derive(Debug, Default)]
pub struct InMemoryRoundRepository {
    rounds: RwLock<Vec<RoundRecord>>,
}

impl InMemoryRoundRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory repository with pre-populated rounds
    pub fn with_rounds(rounds: Vec<RoundRecord>) -> Self {
        Self {
            rounds: RwLock::new(rounds),
        }
    }
}

#[async_trait]
impl RoundRepository for InMemoryRoundRepository {
    #[instrument(skip(self))]
    async fn fetch_rounds(&self) -> Result<Vec<RoundRecord>, AppError> {
        let rounds = self.rounds.read().await;
        debug!(round_count = rounds.len(), "Fetched rounds from memory");
        Ok(rounds.clone())
    }

    #[instrument(skip(self))]
    async fn count_rounds(&self) -> Result<u64, AppError> {
        Ok(self.rounds.read().await.len() as u64)
    }

    #[instrument(skip(self, rounds))]
    async fn replace_rounds(&self, rounds: Vec<RoundRecord>) -> Result<u64, AppError> {
        let mut stored = self.rounds.write().await;
        *stored = rounds;

        debug!(round_count = stored.len(), "Replaced rounds in memory");
        Ok(stored.len() as u64)
    }
}

/// PostgreSQL implementation of the round store, backed by the `round_data` table
pub struct PostgresRoundRepository {
    pool: PgPool,
}

impl PostgresRoundRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(context: &str, error: sqlx::Error) -> AppError {
    warn!(error = %error, "{}", context);
    AppError::DatabaseError(error.to_string())
}

#[async_trait]
impl RoundRepository for PostgresRoundRepository {
    #[instrument(skip(self))]
    async fn fetch_rounds(&self) -> Result<Vec<RoundRecord>, AppError> {
        debug!("Fetching rounds from database");

        // Casts keep tables written by other loaders (float counts, etc.) readable
        let rows: Vec<RoundRow> = sqlx::query_as(
            "SELECT puuid::TEXT AS puuid, kills::BIGINT AS kills, \
             assist_count::BIGINT AS assist_count, death_count::BIGINT AS death_count, \
             player_won_round::BOOLEAN AS player_won_round, \
             kill_victim_puuids::TEXT AS kill_victim_puuids, damage_done::TEXT AS damage_done \
             FROM round_data",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch rounds from database", e))?;

        let row_count = rows.len();
        let rounds: Vec<RoundRecord> = rows.into_iter().filter_map(RoundRow::into_record).collect();

        debug!(
            row_count,
            round_count = rounds.len(),
            "Rounds fetched from database"
        );
        Ok(rounds)
    }

    #[instrument(skip(self))]
    async fn count_rounds(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM round_data")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("Failed to count rounds in database", e))?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self, rounds))]
    async fn replace_rounds(&self, rounds: Vec<RoundRecord>) -> Result<u64, AppError> {
        info!(round_count = rounds.len(), "Replacing round_data table");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to open transaction", e))?;

        sqlx::query("DROP TABLE IF EXISTS round_data")
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("Failed to drop round_data", e))?;

        sqlx::query(
            "CREATE TABLE round_data (\
             puuid TEXT, kills BIGINT, assist_count BIGINT, death_count BIGINT, \
             player_won_round BOOLEAN, kill_victim_puuids TEXT, damage_done TEXT)",
        )
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("Failed to create round_data", e))?;

        let mut written = 0u64;
        for chunk in rounds.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO round_data (puuid, kills, assist_count, death_count, \
                 player_won_round, kill_victim_puuids, damage_done) ",
            );
            builder.push_values(chunk, |mut row, round| {
                row.push_bind(round.player_id.clone())
                    .push_bind(i64::from(round.kills))
                    .push_bind(i64::from(round.assists))
                    .push_bind(i64::from(round.deaths))
                    .push_bind(round.won_round)
                    .push_bind(round.victim_ids.clone())
                    .push_bind(round.damage_breakdown.clone());
            });

            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| database_error("Failed to insert rounds", e))?;
            written += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit round_data replacement", e))?;

        info!(written, "round_data table replaced");
        Ok(written)
    }
}
