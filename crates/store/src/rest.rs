//! Redis REST client.
//!
//! Commands map onto URL paths of the endpoint:
//!
//! - `GET {endpoint}/GET/{key}` reads a key.
//! - `POST {endpoint}/SET` with body `{"args": [key, value]}` writes one.
//!
//! Every reply is a JSON object `{"result": ..., "error": ...}`; a missing
//! key comes back as `"result": null`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};

use crate::backend::{KeyValueStore, StoreConfig};
use crate::StoreError;

#[derive(Debug, Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommandArgs<'a> {
    args: [&'a str; 2],
}

/// Key-value store backed by a Redis REST endpoint.
pub struct RestStore {
    client: Client,
    endpoint: Url,
    auth_token: Option<String>,
}

impl RestStore {
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let endpoint = Url::parse(cfg.endpoint.trim()).map_err(|e| {
            StoreError::InvalidConfig(format!("invalid endpoint '{}': {e}", cfg.endpoint))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(StoreError::InvalidConfig(format!(
                "endpoint '{}' cannot carry a command path",
                cfg.endpoint
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.timeout_secs.min(5)))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            auth_token: cfg.auth_token.clone().filter(|t| !t.is_empty()),
        })
    }

    /// Endpoint URL with `segments` appended, each percent-encoded.
    fn command_url(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Option<String>, StoreError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: CommandReply = response.json().await?;
        if let Some(error) = reply.error {
            return Err(StoreError::Remote(error));
        }
        Ok(reply.result)
    }
}

#[async_trait]
impl KeyValueStore for RestStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let url = self.command_url(&["GET", key]);
        tracing::debug!(key = %key, "store GET");
        self.execute(self.client.get(url)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let url = self.command_url(&["SET"]);
        tracing::debug!(key = %key, "store SET");
        let body = CommandArgs { args: [key, value] };
        match self.execute(self.client.post(url).json(&body)).await? {
            Some(_) => Ok(()),
            None => Err(StoreError::Rejected(key.to_string())),
        }
    }

    fn kind(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(endpoint: &str) -> RestStore {
        RestStore::new(&StoreConfig::rest(endpoint, None)).expect("valid endpoint")
    }

    #[test]
    fn command_url_encodes_key() {
        let store = store("https://redis.example.com");
        let url = store.command_url(&["GET", "user:emily kwan"]);
        assert_eq!(
            url.as_str(),
            "https://redis.example.com/GET/user:emily%20kwan"
        );
    }

    #[test]
    fn command_url_keeps_base_path() {
        let store = store("https://redis.example.com/v1/");
        let url = store.command_url(&["SET"]);
        assert_eq!(url.as_str(), "https://redis.example.com/v1/SET");
    }

    #[test]
    fn command_url_escapes_slashes_in_key() {
        let store = store("https://redis.example.com");
        let url = store.command_url(&["GET", "a/b"]);
        assert_eq!(url.as_str(), "https://redis.example.com/GET/a%2Fb");
    }

    #[test]
    fn empty_token_is_ignored() {
        let cfg = StoreConfig::rest("https://redis.example.com", Some(String::new()));
        let store = RestStore::new(&cfg).unwrap();
        assert!(store.auth_token.is_none());
    }

    #[test]
    fn non_base_endpoint_rejected() {
        let cfg = StoreConfig::rest("mailto:someone@example.com", None);
        assert!(matches!(
            RestStore::new(&cfg),
            Err(StoreError::InvalidConfig(_))
        ));
    }
}
