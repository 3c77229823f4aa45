use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    Aggregator, DamageStatsAggregator, DamageStatsRow, KdaWinrateAggregator, KdaWinrateRow,
    TopVictimsAggregator, TopVictimsRow,
};
use crate::{rounds::repository::RoundRepository, shared::AppError};

/// Runs the per-player reductions against the current contents of the round store
///
/// Every call performs one bulk fetch; nothing is cached between calls.
pub struct StatsService {
    repository: Arc<dyn RoundRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn RoundRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    pub async fn kda_winrate(&self) -> Result<Vec<KdaWinrateRow>, AppError> {
        self.run(&KdaWinrateAggregator::new()).await
    }

    pub async fn top_victims(&self) -> Result<Vec<TopVictimsRow>, AppError> {
        self.run(&TopVictimsAggregator::new()).await
    }

    pub async fn damage_stats(&self) -> Result<Vec<DamageStatsRow>, AppError> {
        self.run(&DamageStatsAggregator::new()).await
    }

    /// Fetches every round and applies `aggregator`; a failed fetch fails the whole call
    #[instrument(skip(self, aggregator), fields(aggregator = aggregator.name()))]
    pub async fn run<A: Aggregator>(&self, aggregator: &A) -> Result<Vec<A::Row>, AppError> {
        let rounds = self.repository.fetch_rounds().await?;
        let rows = aggregator.aggregate(&rounds);

        debug!(
            round_count = rounds.len(),
            row_count = rows.len(),
            "Aggregation completed"
        );
        Ok(rows)
    }
}
