use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::sessions::SessionStore;
use dashmap::DashMap;
use guestlist::{Directory, SignIn};
use matcher::normalize_for_search;
use std::sync::Arc;
use std::time::{Duration, Instant};
use store::KeyValueStore;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Directory, matcher and user store
    pub sign_in: SignIn,

    /// Signed-in guests
    pub sessions: Arc<SessionStore>,

    /// Sign-in attempts: normalized display name -> (count, window_start)
    pub rate_limiter: Arc<DashMap<String, (u32, Instant)>>,
}

impl ServerState {
    /// Create new server state from configuration
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let directory = match &config.directory_path {
            Some(path) => Directory::load(path)?,
            None => Directory::builtin()?,
        };
        let store = config.store.build()?;
        Ok(Self::from_parts(config, directory, store))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        config: ServerConfig,
        directory: Directory,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let sessions = SessionStore::new(config.session_ttl());
        Self {
            config: Arc::new(config),
            sign_in: SignIn::new(Arc::new(directory), store),
            sessions: Arc::new(sessions),
            rate_limiter: Arc::new(DashMap::new()),
        }
    }

    /// Seeds user records and the dev password when one is configured.
    pub async fn prepare(&self) -> ServerResult<()> {
        let Some(password) = &self.config.dev_password else {
            return Ok(());
        };
        tracing::warn!("dev_password is set; every directory user shares it");
        let users = self.sign_in.register_directory_users().await?;
        self.sign_in.seed_passwords(password).await?;
        tracing::info!(users, "seeded directory users");
        Ok(())
    }

    /// Counts a sign-in attempt for `display_name`, or returns `false` when
    /// the per-minute limit is already spent. Check and increment happen
    /// under one map entry lock.
    pub fn reserve_sign_in_attempt(&self, display_name: &str) -> bool {
        let now = Instant::now();
        let mut entry = self
            .rate_limiter
            .entry(normalize_for_search(display_name))
            .or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        // Reset if window has passed
        if now.duration_since(*window_start) > RATE_LIMIT_WINDOW {
            *count = 0;
            *window_start = now;
        }

        if *count >= self.config.sign_in_attempts_per_minute {
            return false;
        }

        *count += 1;
        true
    }

    /// Gives back an attempt that did not reach the password check.
    pub fn release_sign_in_attempt(&self, display_name: &str) {
        if let Some(mut entry) = self.rate_limiter.get_mut(&normalize_for_search(display_name)) {
            let count = &mut entry.value_mut().0;
            *count = count.saturating_sub(1);
        }
    }

    pub fn clear_failed_sign_ins(&self, display_name: &str) {
        self.rate_limiter.remove(&normalize_for_search(display_name));
    }
}

const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
