//! DTOs for the mini URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::MiniUrl;

/// Request body for `POST /api/v1/miniurls` and `PUT /api/v1/miniurls/{miniKey}`.
///
/// Only presence is checked here. Blank, overlong and malformed URLs are
/// rejected by the service, so every bad value maps to `invalid_url`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MiniUrlRequest {
    #[validate(required(message = "fullUrl is required"))]
    pub full_url: Option<String>,
}

/// JSON representation of a stored mapping.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MiniUrlResponse {
    pub mini_key: String,
    pub full_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MiniUrl> for MiniUrlResponse {
    fn from(mini_url: MiniUrl) -> Self {
        Self {
            mini_key: mini_url.mini_key,
            full_url: mini_url.full_url,
            created_at: mini_url.created_at,
            updated_at: mini_url.updated_at,
        }
    }
}
