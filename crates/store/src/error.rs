use thiserror::Error;

/// Errors surfaced by key-value backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Endpoint or timeout settings are unusable.
    #[error("invalid store config: {0}")]
    InvalidConfig(String),
    /// The HTTP request never produced a response (DNS, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("store returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// The endpoint answered 2xx but reported a command error.
    #[error("store error: {0}")]
    Remote(String),
    /// A write was acknowledged without a result.
    #[error("store rejected write to '{0}'")]
    Rejected(String),
    /// Local backend failure, e.g. a poisoned lock.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        StoreError::Backend(msg.into())
    }
}
