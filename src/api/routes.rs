//! API route configuration.

use crate::api::handlers::{
    create_mini_url_handler, delete_mini_url_handler, get_mini_url_handler,
    list_mini_urls_handler, update_mini_url_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Version 1 of the mini URL API.
///
/// # Endpoints
///
/// - `POST   /miniurls`            - Get or create a mapping for a URL
/// - `GET    /miniurls`            - List all mappings
/// - `GET    /miniurls/{miniKey}`  - Look up a mapping
/// - `PUT    /miniurls/{miniKey}`  - Point a key at a new URL
/// - `DELETE /miniurls/{miniKey}`  - Delete a mapping
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/miniurls",
            get(list_mini_urls_handler).post(create_mini_url_handler),
        )
        .route(
            "/miniurls/{mini_key}",
            get(get_mini_url_handler)
                .put(update_mini_url_handler)
                .delete(delete_mini_url_handler),
        )
}
