//! API route handlers
//!
//! - `health`: liveness and readiness
//! - `names`: fuzzy display-name search
//! - `session`: sign in, sign out, current user
//! - `home`: placeholder home page and the guest's schedule

pub mod health;
pub mod home;
pub mod names;
pub mod session;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Root endpoint (GET /), no session required.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Guest List Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/names/search",
            "/api/v1/session",
            "/api/v1/home",
            "/api/v1/schedule",
            "/health",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
