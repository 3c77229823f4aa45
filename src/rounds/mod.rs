// Round record store: raw per-round rows and the repositories holding them
pub mod ingest;
pub mod models;
pub mod repository;

pub use models::{RoundRecord, RoundRow};
pub use repository::{InMemoryRoundRepository, PostgresRoundRepository, RoundRepository};
