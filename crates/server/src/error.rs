use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use guestlist::{AuthError, ConfigLoadError};
use serde::{Deserialize, Serialize};
use store::StoreError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Too many sign-in attempts, try again in a minute")]
    RateLimitExceeded,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Name is required")]
    EmptyName,

    #[error("No guest found matching '{0}'")]
    NameNotFound(String),

    #[error("Password is required")]
    EmptyPassword,

    #[error("Invalid user configuration for '{0}'")]
    UnknownUser(String),

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Directory error: {0}")]
    Directory(#[from] ConfigLoadError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) | ServerError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ServerError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServerError::BadRequest(_)
            | ServerError::EmptyName
            | ServerError::EmptyPassword
            | ServerError::UnknownUser(_) => StatusCode::BAD_REQUEST,
            ServerError::NameNotFound(_) | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Directory(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Authentication(_) => "AUTH_REQUIRED",
            ServerError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::EmptyName => "EMPTY_NAME",
            ServerError::NameNotFound(_) => "NAME_NOT_FOUND",
            ServerError::EmptyPassword => "EMPTY_PASSWORD",
            ServerError::UnknownUser(_) => "UNKNOWN_USER",
            ServerError::InvalidCredentials => "INVALID_CREDENTIALS",
            ServerError::Store(_) => "STORE_UNAVAILABLE",
            ServerError::Directory(_) => "CONFIG_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<AuthError> for ServerError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmptyName => ServerError::EmptyName,
            AuthError::NameNotFound(name) => ServerError::NameNotFound(name),
            AuthError::EmptyPassword => ServerError::EmptyPassword,
            AuthError::UnknownUser(name) => ServerError::UnknownUser(name),
            AuthError::InvalidPassword => ServerError::InvalidCredentials,
            AuthError::Store(err) => ServerError::Store(err),
        }
    }
}
