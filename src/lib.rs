// Library crate for the round statistics service
// This file exposes the public API for the binaries and integration tests

pub mod config;
pub mod rounds;
pub mod routes;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::{Config, ConfigError, StoreKind};
pub use rounds::{InMemoryRoundRepository, PostgresRoundRepository, RoundRecord, RoundRepository};
pub use routes::build_router;
pub use shared::{AppError, AppState};
pub use stats::{DamageStatsRow, KdaWinrateRow, StatsService, TopVictimsRow};
