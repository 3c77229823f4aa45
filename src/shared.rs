use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::rounds::repository::RoundRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub round_repository: Arc<dyn RoundRepository + Send + Sync>,
}

impl AppState {
    pub fn new(round_repository: Arc<dyn RoundRepository + Send + Sync>) -> Self {
        Self { round_repository }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Ingest(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Ingest error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
