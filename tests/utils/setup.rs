use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use roundstats::{build_router, AppState, InMemoryRoundRepository, RoundRecord, RoundRepository};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn with_rounds(rounds: Vec<RoundRecord>) -> Self {
        Self::with_repository(Arc::new(InMemoryRoundRepository::with_rounds(rounds)))
    }

    pub fn with_repository(repository: Arc<dyn RoundRepository + Send + Sync>) -> Self {
        Self {
            router: build_router(AppState::new(repository)),
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    pub async fn get_rows<T: DeserializeOwned>(&self, uri: &str) -> Vec<T> {
        let (status, body) = self.get(uri).await;
        assert_eq!(status, StatusCode::OK, "unexpected status for {}", uri);
        serde_json::from_value(body).unwrap()
    }
}
