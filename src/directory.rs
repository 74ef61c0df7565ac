//! Loaded, indexed guest directory.

use std::collections::HashMap;
use std::path::Path;

use matcher::{NameMatcher, normalize_for_search};
use tracing::debug;

use crate::config::{ConfigLoadError, DirectoryConfig};
use crate::types::{Event, Guest};

/// Guests, events and sign-in names, indexed for lookup.
#[derive(Debug, Clone)]
pub struct Directory {
    name: Option<String>,
    display_names: Vec<String>,
    /// Normalized display name -> user key.
    user_keys: HashMap<String, String>,
    guests: HashMap<String, Guest>,
    events: HashMap<String, Event>,
    matcher: NameMatcher,
}

impl Directory {
    pub fn from_config(config: DirectoryConfig) -> Result<Self, ConfigLoadError> {
        let display_names: Vec<String> = config
            .users
            .iter()
            .map(|u| u.display_name.clone())
            .collect();
        let user_keys = config
            .users
            .into_iter()
            .map(|u| (normalize_for_search(&u.display_name), u.user_key))
            .collect();

        let matcher = NameMatcher::with_config(display_names.clone(), config.matcher)
            .map_err(|e| ConfigLoadError::Validation(e.to_string()))?;

        debug!(
            users = display_names.len(),
            guests = config.guests.len(),
            events = config.events.len(),
            "directory loaded"
        );

        Ok(Self {
            name: config.name,
            display_names,
            user_keys,
            guests: config
                .guests
                .into_iter()
                .map(|g| (g.slug.clone(), g))
                .collect(),
            events: config
                .events
                .into_iter()
                .map(|e| (e.slug.clone(), e))
                .collect(),
            matcher,
        })
    }

    /// The directory compiled into the crate.
    pub fn builtin() -> Result<Self, ConfigLoadError> {
        Self::from_config(DirectoryConfig::builtin()?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        Self::from_config(DirectoryConfig::from_file(path)?)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sign-in names in configuration order; the matcher's candidate set.
    pub fn display_names(&self) -> &[String] {
        &self.display_names
    }

    /// User key for a display name. Lookup ignores case and spacing.
    pub fn user_key_for(&self, display_name: &str) -> Option<&str> {
        self.user_keys
            .get(&normalize_for_search(display_name))
            .map(String::as_str)
    }

    pub fn guest(&self, slug: &str) -> Option<&Guest> {
        self.guests.get(slug)
    }

    pub fn event(&self, slug: &str) -> Option<&Event> {
        self.events.get(slug)
    }

    /// Events a guest is invited to, earliest first. Unknown guest gives
    /// an empty schedule.
    pub fn events_for_guest(&self, slug: &str) -> Vec<&Event> {
        let Some(guest) = self.guests.get(slug) else {
            return Vec::new();
        };
        let mut events: Vec<&Event> = guest
            .events
            .iter()
            .filter_map(|e| self.events.get(e))
            .collect();
        events.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.slug.cmp(&b.slug)));
        events
    }

    /// The other members of a guest's party.
    pub fn party_for_guest(&self, slug: &str) -> Vec<&Guest> {
        self.guests
            .get(slug)
            .map(|g| g.party.iter().filter_map(|p| self.guests.get(p)).collect())
            .unwrap_or_default()
    }

    pub fn matcher(&self) -> &NameMatcher {
        &self.matcher
    }
}
