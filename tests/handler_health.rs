mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use miniurl::domain::entities::{InsertOutcome, MiniUrl, NewMiniUrl};
use miniurl::domain::repositories::MiniUrlRepository;
use miniurl::error::AppError;
use serde_json::{Value, json};
use std::sync::Arc;

/// Store that is never reachable.
struct UnreachableRepository;

fn unreachable_error() -> AppError {
    AppError::internal("connection refused", json!({}))
}

#[async_trait]
impl MiniUrlRepository for UnreachableRepository {
    async fn exists(&self, _mini_key: &str) -> Result<bool, AppError> {
        Err(unreachable_error())
    }

    async fn find_by_key(&self, _mini_key: &str) -> Result<Option<MiniUrl>, AppError> {
        Err(unreachable_error())
    }

    async fn find_by_full_url(&self, _full_url: &str) -> Result<Option<MiniUrl>, AppError> {
        Err(unreachable_error())
    }

    async fn insert_if_absent(&self, _new: NewMiniUrl) -> Result<InsertOutcome, AppError> {
        Err(unreachable_error())
    }

    async fn update_full_url(
        &self,
        _mini_key: &str,
        _full_url: &str,
    ) -> Result<Option<MiniUrl>, AppError> {
        Err(unreachable_error())
    }

    async fn delete(&self, _mini_key: &str) -> Result<bool, AppError> {
        Err(unreachable_error())
    }

    async fn list_all(&self) -> Result<Vec<MiniUrl>, AppError> {
        Err(unreachable_error())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unreachable_error())
    }
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = common::create_test_server(common::create_test_state());

    let json = server.get("/health").await.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("storage").is_some());
}

#[tokio::test]
async fn test_health_endpoint_storage_down() {
    let state = common::create_test_state_with(Arc::new(UnreachableRepository));
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["storage"]["status"], "error");
}

#[tokio::test]
async fn test_storage_error_maps_to_internal_error() {
    let state = common::create_test_state_with(Arc::new(UnreachableRepository));
    let server = common::create_test_server(state);

    let response = server.get("/api/v1/miniurls/abcdefg").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"]["code"], "internal_error");
}
