use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;
use crate::middleware::session_id;
use crate::sessions::{Session, SESSION_COOKIE};
use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use guestlist::AuthError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use store::User;

/// Sign-in request
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    /// Display name, usually the `resolved` name from a search
    pub display_name: String,
    #[serde(default)]
    pub password: String,
}

/// Current session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: User,
    pub user_key: String,
}

/// Sign in and start a session
///
/// Each attempt is counted against the per-name limit; attempts that fail
/// before the password check are given back, a success clears the count.
pub async fn sign_in(
    State(state): State<Arc<ServerState>>,
    ApiJson(request): ApiJson<SignInRequest>,
) -> ServerResult<impl IntoResponse> {
    if !state.reserve_sign_in_attempt(&request.display_name) {
        tracing::warn!(display_name = %request.display_name, "sign-in rate limited");
        return Err(ServerError::RateLimitExceeded);
    }

    let user = match state
        .sign_in
        .authenticate(&request.display_name, &request.password)
        .await
    {
        Ok(user) => user,
        Err(AuthError::InvalidPassword) => return Err(ServerError::InvalidCredentials),
        Err(err) => {
            state.release_sign_in_attempt(&request.display_name);
            return Err(err.into());
        }
    };
    state.clear_failed_sign_ins(&request.display_name);

    let user_key = state
        .sign_in
        .directory()
        .user_key_for(&user.full_name)
        .ok_or_else(|| ServerError::UnknownUser(user.full_name.clone()))?
        .to_string();

    let purged = state.sessions.purge_expired();
    if purged > 0 {
        tracing::debug!(purged, "dropped expired sessions");
    }
    let id = state.sessions.create(user.clone(), user_key.clone());
    let cookie = session_cookie(&id, state.sessions.ttl().as_secs(), state.config.secure_cookies)?;

    Ok((
        [(SET_COOKIE, cookie)],
        Json(SessionResponse { user, user_key }),
    ))
}

/// Sign out; always succeeds and clears the cookie
pub async fn sign_out(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> ServerResult<impl IntoResponse> {
    if let Some(id) = session_id(&headers) {
        if state.sessions.remove(&id) {
            tracing::info!("signed out");
        }
    }
    let cookie = session_cookie("", 0, state.config.secure_cookies)?;
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]))
}

/// The signed-in user
pub async fn current_session(Extension(session): Extension<Session>) -> impl IntoResponse {
    Json(SessionResponse {
        user: session.user,
        user_key: session.user_key,
    })
}

fn session_cookie(id: &str, max_age_secs: u64, secure: bool) -> ServerResult<HeaderValue> {
    let mut cookie =
        format!("{SESSION_COOKIE}={id}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| ServerError::Internal(format!("invalid session cookie: {e}")))
}
