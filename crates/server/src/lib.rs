//! Guest list server: HTTP JSON API for wedding guest sign-in
//!
//! Guests type their name, the server resolves it against the guest
//! directory with the fuzzy name matcher, then checks their password
//! against the user store and starts a cookie session.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! ## Public
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check (pings the user store)
//! - `POST /api/v1/names/search` - Resolve a typed name
//! - `POST /api/v1/session` - Sign in, sets the `wed_user` cookie
//! - `DELETE /api/v1/session` - Sign out
//!
//! ## Session required
//!
//! - `GET /api/v1/session` - Current user
//! - `GET /api/v1/home` - Placeholder home page
//! - `GET /api/v1/schedule` - The guest's events
//!
//! # Configuration
//!
//! Read from an optional `server.{toml,yaml,json}` file and `WED_SERVER__*`
//! environment variables, e.g. `WED_SERVER__STORE__ENDPOINT`,
//! `WED_SERVER__STORE__AUTH_TOKEN`, `WED_SERVER__DIRECTORY_PATH`.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod sessions;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
