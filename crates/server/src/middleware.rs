use crate::error::ServerError;
use crate::sessions::SESSION_COOKIE;
use crate::state::ServerState;
use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use headers::{Cookie, HeaderMapExt};
use std::sync::Arc;

/// Request id carried in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Session cookie authentication middleware
///
/// Resolves the `wed_user` cookie to a live session and stores the
/// [`Session`](crate::sessions::Session) in request extensions.
pub async fn session_auth(
    State(state): State<Arc<ServerState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let session = session_id(request.headers()).and_then(|id| state.sessions.get(&id));

    match session {
        Some(session) => {
            request.extensions_mut().insert(session);
            Ok(next.run(request).await)
        }
        None => Err(ServerError::Authentication("Sign in required".to_string())),
    }
}

/// Session id from the request's cookies, if any.
pub fn session_id(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|c| c.get(SESSION_COOKIE).map(str::to_string))
        .filter(|id| !id.is_empty())
}

/// Request ID injection middleware
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Logging middleware
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    tracing::info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "Request started"
    );

    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}
