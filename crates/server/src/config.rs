use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use store::StoreConfig;

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Key-value store holding users and passwords
    #[serde(default)]
    pub store: StoreConfig,

    /// Guest directory YAML; the built-in directory when unset
    #[serde(default)]
    pub directory_path: Option<String>,

    /// Session lifetime in seconds
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Failed sign-ins allowed per display name per minute
    #[serde(default = "default_sign_in_attempts_per_minute")]
    pub sign_in_attempts_per_minute: u32,

    /// Mark the session cookie `Secure`
    #[serde(default)]
    pub secure_cookies: bool,

    /// Password seeded for every directory user at start-up (local runs only)
    #[serde(default)]
    pub dev_password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            store: StoreConfig::default(),
            directory_path: None,
            session_ttl_secs: default_session_ttl_secs(),
            sign_in_attempts_per_minute: default_sign_in_attempts_per_minute(),
            secure_cookies: false,
            dev_password: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config files
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            // e.g. WED_SERVER__PORT, WED_SERVER__STORE__ENDPOINT
            .add_source(config::Environment::with_prefix("WED_SERVER").separator("__"));

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        if config.store.endpoint.trim().is_empty() && config.dev_password.is_none() {
            tracing::warn!(
                "No store endpoint and no dev_password configured; nobody will be able to sign in"
            );
        }

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        if self.session_ttl_secs == 0 {
            anyhow::bail!("session_ttl_secs must be greater than zero");
        }
        if self.sign_in_attempts_per_minute == 0 {
            anyhow::bail!("sign_in_attempts_per_minute must be greater than zero");
        }
        if matches!(&self.dev_password, Some(p) if p.is_empty()) {
            anyhow::bail!("dev_password must not be empty when set");
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_session_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

fn default_sign_in_attempts_per_minute() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.session_ttl_secs, 604_800);
        assert_eq!(cfg.sign_in_attempts_per_minute, 10);
        assert!(cfg.enable_cors);
        assert!(!cfg.secure_cookies);
        assert!(cfg.store.endpoint.is_empty());
        assert!(cfg.directory_path.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let cfg = ServerConfig {
            session_ttl_secs: 0,
            ..ServerConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ServerConfig {
            sign_in_attempts_per_minute: 0,
            ..ServerConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ServerConfig {
            dev_password: Some(String::new()),
            ..ServerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let cfg: ServerConfig = serde_json::from_value(serde_json::json!({
            "port": 9000,
            "store": { "endpoint": "https://example.upstash.io", "auth_token": "t" }
        }))
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.store.endpoint, "https://example.upstash.io");
        assert_eq!(cfg.store.timeout_secs, 10);
        assert_eq!(cfg.log_level, "info");
    }
}
