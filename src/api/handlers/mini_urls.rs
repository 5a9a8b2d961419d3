//! Handlers for the mini URL endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::mini_url::{MiniUrlRequest, MiniUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the mapping for a URL, creating it if none exists.
///
/// # Endpoint
///
/// `POST /api/v1/miniurls`
///
/// # Request Body
///
/// ```json
/// { "fullUrl": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "miniKey": "aZ3kP9qx",
///   "fullUrl": "https://example.com",
///   "createdAt": "2026-01-15T10:30:00Z",
///   "updatedAt": "2026-01-15T10:30:00Z"
/// }
/// ```
///
/// Repeating the request with the same `fullUrl` returns the same record.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed, `fullUrl` is missing,
/// or the URL is invalid.
pub async fn create_mini_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<MiniUrlRequest>, JsonRejection>,
) -> Result<Json<MiniUrlResponse>, AppError> {
    let full_url = full_url_from(payload)?;
    tracing::info!(full_url = %full_url, "Create or get mini URL");

    let mini_url = state.mini_url_service.get_or_create(&full_url).await?;

    Ok(Json(mini_url.into()))
}

/// Looks up a mapping by its key.
///
/// # Endpoint
///
/// `GET /api/v1/miniurls/{miniKey}`
///
/// # Errors
///
/// Returns 404 Not Found if no mapping exists for the key.
pub async fn get_mini_url_handler(
    Path(mini_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MiniUrlResponse>, AppError> {
    let mini_url = state.mini_url_service.get_by_key(&mini_key).await?;

    Ok(Json(mini_url.into()))
}

/// Points an existing key at a new URL.
///
/// # Endpoint
///
/// `PUT /api/v1/miniurls/{miniKey}`
///
/// # Request Body
///
/// ```json
/// { "fullUrl": "https://new-destination.com" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid.
/// Returns 404 Not Found if no mapping exists for the key.
pub async fn update_mini_url_handler(
    Path(mini_key): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<MiniUrlRequest>, JsonRejection>,
) -> Result<Json<MiniUrlResponse>, AppError> {
    tracing::info!(mini_key, "Update mini URL");
    let full_url = full_url_from(payload)?;

    let mini_url = state.mini_url_service.update(&mini_key, &full_url).await?;

    Ok(Json(mini_url.into()))
}

/// Deletes a mapping.
///
/// # Endpoint
///
/// `DELETE /api/v1/miniurls/{miniKey}`
///
/// Responds 200 OK with an empty body.
///
/// # Errors
///
/// Returns 404 Not Found if no mapping exists for the key.
pub async fn delete_mini_url_handler(
    Path(mini_key): Path<String>,
    State(state): State<AppState>,
) -> Result<(), AppError> {
    tracing::info!(mini_key, "Delete mini URL");
    state.mini_url_service.delete(&mini_key).await
}

/// Lists every mapping.
///
/// # Endpoint
///
/// `GET /api/v1/miniurls`
pub async fn list_mini_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<MiniUrlResponse>>, AppError> {
    let mini_urls = state.mini_url_service.list_all().await?;

    Ok(Json(mini_urls.into_iter().map(Into::into).collect()))
}

/// Unpacks a request body into its URL, rejecting unreadable bodies and a
/// missing `fullUrl` with `validation_error`.
fn full_url_from(
    payload: Result<Json<MiniUrlRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    Ok(request.full_url.unwrap_or_default())
}
