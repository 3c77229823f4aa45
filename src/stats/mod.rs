pub mod aggregators;
pub mod decoder;
pub mod handlers;
pub mod models;
pub mod service;

pub use aggregators::{DamageStatsAggregator, KdaWinrateAggregator, TopVictimsAggregator};
pub use decoder::{DamageBreakdown, DecodeError};
pub use models::*;
pub use service::StatsService;

use serde::Serialize;

use crate::rounds::RoundRecord;

/// One reduction from raw round records to per-player result rows
///
/// Implementations are pure: the same records always produce the same rows,
/// and a malformed nested field only ever affects its own player.
pub trait Aggregator: Send + Sync {
    type Row: Serialize + Send;

    fn aggregate(&self, records: &[RoundRecord]) -> Vec<Self::Row>;

    fn name(&self) -> &'static str;
}
