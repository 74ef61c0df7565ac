//! Sign-in: resolve a typed name to a display name, then check the password.

use std::sync::Arc;

use matcher::NameMatch;
use serde::Serialize;
use store::schema::normalize_full_name;
use store::{KeyValueStore, StoreError, User, UserRepository};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::directory::Directory;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("name is required")]
    EmptyName,

    #[error("no guest found matching '{0}'")]
    NameNotFound(String),

    #[error("password is required")]
    EmptyPassword,

    #[error("invalid user configuration for '{0}'")]
    UnknownUser(String),

    #[error("incorrect password")]
    InvalidPassword,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of looking a typed name up in the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameLookup {
    /// The name as typed.
    pub query: String,
    /// Top-ranked display name.
    pub display_name: String,
    /// Every match, best first.
    pub candidates: Vec<String>,
    /// More than one name matched; `display_name` is only the best guess.
    pub ambiguous: bool,
    /// Score and category per candidate, same order as `candidates`.
    pub scored: Vec<NameMatch>,
}

/// Ties the directory's name matcher to the user store.
#[derive(Clone)]
pub struct SignIn {
    directory: Arc<Directory>,
    users: UserRepository,
}

impl SignIn {
    pub fn new(directory: Arc<Directory>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            directory,
            users: UserRepository::new(store),
        }
    }

    pub fn directory(&self) -> &Arc<Directory> {
        &self.directory
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn resolve_name(&self, name: &str) -> Result<NameLookup, AuthError> {
        if name.trim().is_empty() {
            return Err(AuthError::EmptyName);
        }

        let scored = self.directory.matcher().search_scored(name);
        let Some(best) = scored.first() else {
            debug!(query = %name, "no directory match");
            return Err(AuthError::NameNotFound(name.trim().to_string()));
        };

        let display_name = best.name.clone();
        let candidates: Vec<String> = scored.iter().map(|m| m.name.clone()).collect();
        let ambiguous = candidates.len() > 1;
        if ambiguous {
            debug!(query = %name, matches = candidates.len(), "ambiguous name, using best match");
        }

        Ok(NameLookup {
            query: name.to_string(),
            display_name,
            candidates,
            ambiguous,
            scored,
        })
    }

    /// Checks `password` for a directory display name. Surrounding
    /// whitespace in the password is ignored.
    pub async fn authenticate(&self, display_name: &str, password: &str) -> Result<User, AuthError> {
        let password = password.trim();
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let user_key = self
            .directory
            .user_key_for(display_name)
            .ok_or_else(|| AuthError::UnknownUser(display_name.to_string()))?;

        if !self.users.validate_password(user_key, password).await? {
            warn!(user_key = %user_key, "sign-in rejected");
            return Err(AuthError::InvalidPassword);
        }

        info!(user_key = %user_key, "signed in");
        let display_name = display_name.trim();
        Ok(User {
            normalized_name: normalize_full_name(display_name),
            full_name: display_name.to_string(),
        })
    }

    /// Writes a `user:{name}` record for every directory display name.
    pub async fn register_directory_users(&self) -> Result<usize, AuthError> {
        let mut written = 0;
        for name in self.directory.display_names() {
            if self.users.set_user(name).await?.is_some() {
                written += 1;
            }
        }
        Ok(written)
    }

    /// Sets the same password for every directory user. Local runs only.
    pub async fn seed_passwords(&self, password: &str) -> Result<usize, AuthError> {
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        let mut written = 0;
        for name in self.directory.display_names() {
            if let Some(key) = self.directory.user_key_for(name) {
                self.users.set_password(key, password).await?;
                written += 1;
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::InMemoryStore;

    fn sign_in() -> SignIn {
        let store = InMemoryStore::with_entries([("user:emily_kwan:password", "sept24")]);
        SignIn::new(Arc::new(Directory::builtin().unwrap()), Arc::new(store))
    }

    #[test]
    fn resolve_exact_name() {
        let lookup = sign_in().resolve_name("emily kwan").unwrap();
        assert_eq!(lookup.display_name, "Emily Kwan");
        assert_eq!(lookup.candidates, ["Emily Kwan"]);
        assert!(!lookup.ambiguous);
    }

    #[test]
    fn resolve_keeps_scores_in_candidate_order() {
        let lookup = sign_in().resolve_name("e").unwrap();
        let scored_names: Vec<&str> = lookup.scored.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(scored_names, lookup.candidates);

        let exact = sign_in().resolve_name("EMILY KWAN").unwrap();
        assert_eq!(exact.scored.len(), 1);
        assert_eq!(exact.scored[0].category, matcher::MatchCategory::Exact);
    }

    #[test]
    fn resolve_partial_name() {
        let lookup = sign_in().resolve_name("chew").unwrap();
        assert_eq!(lookup.display_name, "Arden Chew");
        assert_eq!(lookup.query, "chew");
    }

    #[test]
    fn resolve_blank_name_is_error() {
        assert!(matches!(sign_in().resolve_name("   "), Err(AuthError::EmptyName)));
    }

    #[test]
    fn resolve_unknown_name_is_error() {
        match sign_in().resolve_name("zzz") {
            Err(AuthError::NameNotFound(q)) => assert_eq!(q, "zzz"),
            other => panic!("expected NameNotFound, got {other:?}"),
        }
    }

    #[test]
    fn resolve_ambiguous_keeps_every_match() {
        // "e" is a substring of both names.
        let lookup = sign_in().resolve_name("e").unwrap();
        assert!(lookup.ambiguous);
        assert_eq!(lookup.candidates.len(), 2);
        assert_eq!(lookup.display_name, lookup.candidates[0]);
    }

    #[tokio::test]
    async fn authenticate_success() {
        let user = sign_in().authenticate("Emily Kwan", "sept24").await.unwrap();
        assert_eq!(user.full_name, "Emily Kwan");
        assert_eq!(user.normalized_name, "emily kwan");
    }

    #[tokio::test]
    async fn authenticate_wrong_password() {
        let result = sign_in().authenticate("Emily Kwan", "nope").await;
        assert!(matches!(result, Err(AuthError::InvalidPassword)));
    }

    #[tokio::test]
    async fn authenticate_missing_password_record() {
        let result = sign_in().authenticate("Arden Chew", "anything").await;
        assert!(matches!(result, Err(AuthError::InvalidPassword)));
    }

    #[tokio::test]
    async fn authenticate_empty_password() {
        let result = sign_in().authenticate("Emily Kwan", "").await;
        assert!(matches!(result, Err(AuthError::EmptyPassword)));
    }

    #[tokio::test]
    async fn authenticate_whitespace_password_is_empty() {
        let result = sign_in().authenticate("Emily Kwan", "   ").await;
        assert!(matches!(result, Err(AuthError::EmptyPassword)));
    }

    #[tokio::test]
    async fn authenticate_trims_password() {
        let user = sign_in().authenticate("Emily Kwan", " sept24 ").await.unwrap();
        assert_eq!(user.full_name, "Emily Kwan");
    }

    #[tokio::test]
    async fn authenticate_unknown_display_name() {
        let result = sign_in().authenticate("Charlie Chu", "sept24").await;
        assert!(matches!(result, Err(AuthError::UnknownUser(_))));
    }

    #[tokio::test]
    async fn register_and_seed() {
        let service = sign_in();
        assert_eq!(service.register_directory_users().await.unwrap(), 2);
        assert_eq!(service.seed_passwords("dev").await.unwrap(), 2);

        let user = service
            .users()
            .find_user_by_full_name("arden chew")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.full_name, "Arden Chew");
        assert!(service.authenticate("Arden Chew", "dev").await.is_ok());
    }
}
