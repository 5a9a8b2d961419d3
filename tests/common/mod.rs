#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use miniurl::application::services::MiniUrlService;
use miniurl::application::services::mini_url_service::DEFAULT_MAX_KEY_ATTEMPTS;
use miniurl::domain::repositories::MiniUrlRepository;
use miniurl::infrastructure::persistence::InMemoryMiniUrlRepository;
use miniurl::routes::app_router;
use miniurl::state::AppState;
use miniurl::utils::key_generator::KeyGenerator;
use miniurl::utils::url_validator::DefaultUrlValidator;
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_test_mini_url(pool: &PgPool, key: &str, url: &str) {
    sqlx::query("INSERT INTO mini_urls (mini_key, full_url) VALUES ($1, $2)")
        .bind(key)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub fn create_test_state_with(repository: Arc<dyn MiniUrlRepository>) -> AppState {
    let service = MiniUrlService::new(
        repository,
        Arc::new(DefaultUrlValidator),
        KeyGenerator::with_defaults(),
        DEFAULT_MAX_KEY_ATTEMPTS,
    );

    AppState::new(Arc::new(service))
}

pub fn create_test_state() -> AppState {
    create_test_state_with(Arc::new(InMemoryMiniUrlRepository::new()))
}

/// Serves the full application router, middleware included.
pub fn create_test_server(state: AppState) -> TestServer {
    let app = Router::new().fallback_service(app_router(state));
    TestServer::new(app).unwrap()
}
