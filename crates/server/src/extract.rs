//! Request extractors.

use crate::error::ServerError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections use the API error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);
