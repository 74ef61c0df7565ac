use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::backend::KeyValueStore;
use crate::schema::{create_user_key, normalize_full_name, password_key, validate_full_name, User};
use crate::StoreError;

/// User records on top of any [`KeyValueStore`].
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Looks a user up by the name as typed. Blank names and unknown users
    /// are `Ok(None)`.
    pub async fn find_user_by_full_name(&self, full_name: &str) -> Result<Option<User>, StoreError> {
        if !validate_full_name(full_name) {
            return Ok(None);
        }
        let normalized = normalize_full_name(full_name);
        let stored = self.store.get(&create_user_key(full_name)).await?;

        Ok(stored
            .filter(|name| !name.is_empty())
            .map(|full_name| User {
                normalized_name: normalized,
                full_name,
            }))
    }

    /// Looks a user up by an already-normalized name.
    pub async fn get_user(&self, normalized_name: &str) -> Result<Option<User>, StoreError> {
        let key = format!("user:{normalized_name}");
        let stored = self.store.get(&key).await?;

        Ok(stored
            .filter(|name| !name.is_empty())
            .map(|full_name| User {
                normalized_name: normalized_name.to_string(),
                full_name,
            }))
    }

    /// Creates or overwrites a user. Blank names are `Ok(None)`.
    pub async fn set_user(&self, full_name: &str) -> Result<Option<User>, StoreError> {
        if !validate_full_name(full_name) {
            return Ok(None);
        }
        self.store.set(&create_user_key(full_name), full_name).await?;
        Ok(Some(User::from_full_name(full_name)))
    }

    /// Checks `password` against `user:{user_key}:password`. A missing
    /// password never validates.
    pub async fn validate_password(&self, user_key: &str, password: &str) -> Result<bool, StoreError> {
        let Some(stored) = self.store.get(&password_key(user_key)).await? else {
            tracing::debug!(user_key = %user_key, "no password stored");
            return Ok(false);
        };
        if stored.is_empty() {
            return Ok(false);
        }
        Ok(stored.as_bytes().ct_eq(password.as_bytes()).into())
    }

    pub async fn set_password(&self, user_key: &str, password: &str) -> Result<(), StoreError> {
        self.store.set(&password_key(user_key), password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryStore;

    fn repository() -> UserRepository {
        UserRepository::new(Arc::new(InMemoryStore::with_entries([
            ("user:emily kwan", "Emily Kwan"),
            ("user:emily_kwan:password", "sept24"),
        ])))
    }

    #[tokio::test]
    async fn find_by_full_name_normalizes() {
        let repo = repository();
        let user = repo
            .find_user_by_full_name("  EMILY KWAN ")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(user.normalized_name, "emily kwan");
        assert_eq!(user.full_name, "Emily Kwan");
    }

    #[tokio::test]
    async fn find_unknown_or_blank_is_none() {
        let repo = repository();
        assert!(repo.find_user_by_full_name("Arden Chew").await.unwrap().is_none());
        assert!(repo.find_user_by_full_name("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_user() {
        let repo = repository();
        let user = repo.set_user("Arden Chew").await.unwrap().expect("stored");
        assert_eq!(user.normalized_name, "arden chew");

        let fetched = repo.get_user("arden chew").await.unwrap().expect("exists");
        assert_eq!(fetched.full_name, "Arden Chew");
        assert!(repo.set_user("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn password_validation() {
        let repo = repository();
        assert!(repo.validate_password("emily_kwan", "sept24").await.unwrap());
        assert!(!repo.validate_password("emily_kwan", "sept2").await.unwrap());
        assert!(!repo.validate_password("emily_kwan", "").await.unwrap());
        assert!(!repo.validate_password("arden_chew", "sept24").await.unwrap());
    }

    #[tokio::test]
    async fn set_password_then_validate() {
        let repo = repository();
        repo.set_password("arden_chew", "rich-table").await.unwrap();
        assert!(repo.validate_password("arden_chew", "rich-table").await.unwrap());
    }

    #[tokio::test]
    async fn empty_stored_password_never_validates() {
        let repo = UserRepository::new(Arc::new(InMemoryStore::with_entries([(
            "user:emily_kwan:password",
            "",
        )])));
        assert!(!repo.validate_password("emily_kwan", "").await.unwrap());
    }
}
