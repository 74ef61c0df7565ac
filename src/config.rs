//! YAML guest directory.
//!
//! The directory lists who may sign in (`users`), the guests themselves and
//! the events they are invited to. It is loaded once at start-up.
//!
//! ## Example
//!
//! ```yaml
//! version: "1"
//! name: "Emily & Arden"
//!
//! users:
//!   - display_name: Emily Kwan
//!     user_key: emily_kwan
//!
//! guests:
//!   - slug: emily_kwan
//!     first: Emily
//!     last: Kwan
//!     nickname: Em
//!     events: [courthouse]
//!
//! events:
//!   - slug: courthouse
//!     name: Courthouse Wedding and Photographs
//!     start_time: "2026-09-24T15:00:00"
//!     location: San Francisco City Hall
//!     description: Intimate ceremony for immediate family.
//!     rsvpable: true
//!
//! # optional scoring overrides
//! matcher:
//!   min_word_score: 0.5
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use matcher::{MatchConfig, normalize_for_search};
use serde::{Deserialize, Serialize};
use store::schema::validate_full_name;
use thiserror::Error;

use crate::types::{Event, Guest};

/// Directory shipped with the crate.
pub const BUILTIN_DIRECTORY: &str = include_str!("../directory.yaml");

/// Errors that can occur when loading a directory file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read directory file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported directory version: {0}")]
    UnsupportedVersion(String),
}

/// Display name a guest signs in with, and the key their password is
/// stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub display_name: String,
    pub user_key: String,
}

/// Top-level directory file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Searchable display names, in search order.
    #[serde(default)]
    pub users: Vec<UserEntry>,

    #[serde(default)]
    pub guests: Vec<Guest>,

    #[serde(default)]
    pub events: Vec<Event>,

    #[serde(default)]
    pub matcher: MatchConfig,
}

impl DirectoryConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: DirectoryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn builtin() -> Result<Self, ConfigLoadError> {
        Self::from_yaml(BUILTIN_DIRECTORY)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.matcher
            .validate()
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;

        let event_slugs = unique(self.events.iter().map(|e| e.slug.as_str()), "event slug")?;
        let guest_slugs = unique(self.guests.iter().map(|g| g.slug.as_str()), "guest slug")?;

        for guest in &self.guests {
            for member in &guest.party {
                if !guest_slugs.contains(member.as_str()) {
                    return Err(ConfigLoadError::Validation(format!(
                        "guest '{}' has unknown party member '{member}'",
                        guest.slug
                    )));
                }
            }
            for event in &guest.events {
                if !event_slugs.contains(event.as_str()) {
                    return Err(ConfigLoadError::Validation(format!(
                        "guest '{}' is invited to unknown event '{event}'",
                        guest.slug
                    )));
                }
            }
        }

        let mut seen_names = HashSet::new();
        let mut seen_keys = HashSet::new();
        for user in &self.users {
            if !validate_full_name(&user.display_name) {
                return Err(ConfigLoadError::Validation(
                    "users.display_name must not be empty".into(),
                ));
            }
            if user.user_key.trim().is_empty() {
                return Err(ConfigLoadError::Validation(format!(
                    "user '{}' has an empty user_key",
                    user.display_name
                )));
            }
            // Two names that normalize alike would make exact matches ambiguous.
            if !seen_names.insert(normalize_for_search(&user.display_name)) {
                return Err(ConfigLoadError::Validation(format!(
                    "duplicate display name '{}'",
                    user.display_name
                )));
            }
            if !seen_keys.insert(user.user_key.as_str()) {
                return Err(ConfigLoadError::Validation(format!(
                    "duplicate user key '{}'",
                    user.user_key
                )));
            }
            if !guest_slugs.contains(user.user_key.as_str()) {
                return Err(ConfigLoadError::Validation(format!(
                    "user '{}' has no guest entry '{}'",
                    user.display_name, user.user_key
                )));
            }
        }

        Ok(())
    }
}

fn unique<'a>(
    slugs: impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<HashSet<&'a str>, ConfigLoadError> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if slug.trim().is_empty() {
            return Err(ConfigLoadError::Validation(format!("empty {what}")));
        }
        if !seen.insert(slug) {
            return Err(ConfigLoadError::Validation(format!("duplicate {what} '{slug}'")));
        }
    }
    Ok(seen)
}
