use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use roundstats::{AppError, InMemoryRoundRepository, RoundRecord, RoundRepository};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Store whose every call fails as if the database were unreachable
pub struct FailingRoundRepository;

#[async_trait]
impl RoundRepository for FailingRoundRepository {
    async fn fetch_rounds(&self) -> Result<Vec<RoundRecord>, AppError> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn count_rounds(&self) -> Result<u64, AppError> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn replace_rounds(&self, _rounds: Vec<RoundRecord>) -> Result<u64, AppError> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }
}

/// In-memory store that counts bulk fetches
pub struct RecordingRoundRepository {
    inner: InMemoryRoundRepository,
    fetches: AtomicUsize,
}

impl RecordingRoundRepository {
    pub fn new(rounds: Vec<RoundRecord>) -> Self {
        Self {
            inner: InMemoryRoundRepository::with_rounds(rounds),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoundRepository for RecordingRoundRepository {
    async fn fetch_rounds(&self) -> Result<Vec<RoundRecord>, AppError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_rounds().await
    }

    async fn count_rounds(&self) -> Result<u64, AppError> {
        self.inner.count_rounds().await
    }

    async fn replace_rounds(&self, rounds: Vec<RoundRecord>) -> Result<u64, AppError> {
        self.inner.replace_rounds(rounds).await
    }
}
