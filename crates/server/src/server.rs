//! Server initialization and routing
//!
//! This module handles the Axum server setup:
//! - Router configuration with all API endpoints
//! - Middleware stack (session auth, logging, compression, etc.)
//! - Graceful shutdown handling

use crate::config::ServerConfig;
use crate::middleware::{log_requests, request_id, session_auth};
use crate::routes::{api_info, not_found};
use crate::routes::{health, home, names, session};
use crate::state::ServerState;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Routes are divided into:
/// - Public routes: /, /health, /ready, name search, sign in and sign out
/// - Protected routes: `GET /api/v1/session`, home and schedule (session
///   cookie required)
///
/// `request_id` wraps `log_requests` so every log line carries the id.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    // Only the routes layered here need a session; `route_layer` leaves
    // routes added afterwards public.
    let session_required = from_fn_with_state(state.clone(), session_auth);

    let session_routes = get(session::current_session)
        .route_layer(session_required.clone())
        .post(session::sign_in)
        .delete(session::sign_out);

    let protected_routes = Router::new()
        .route("/api/v1/home", get(home::home))
        .route("/api/v1/schedule", get(home::schedule))
        .route_layer(session_required);

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/api/v1/names/search", post(names::search_names))
        .route("/api/v1/session", session_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(state.config.timeout_secs),
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the guest list HTTP server
///
/// Blocks until the server is shut down via SIGTERM or Ctrl+C.
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
///
/// Start-up sets up JSON logging at the configured level, loads the guest
/// directory, connects the user store, seeds the dev password if one is
/// configured, and binds the listener.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let state = Arc::new(ServerState::new(config.clone())?);
    state.prepare().await?;

    let app = build_router(state.clone());
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting guest list server on {} with {} directory users",
        addr,
        state.sign_in.directory().display_names().len()
    );
    tracing::info!(
        "Store: {}, timeout: {}s, session ttl: {}s",
        state.sign_in.users().store().kind(),
        config.timeout_secs,
        config.session_ttl_secs
    );
    tracing::info!(
        "Sign-in limit: {} failed attempts/minute, CORS: {}",
        config.sign_in_attempts_per_minute,
        config.enable_cors
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
