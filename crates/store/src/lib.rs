//! # Guest store (`store`)
//!
//! Users and their passwords live in a remote key-value store reached over
//! HTTP. This crate owns that contract:
//!
//! - [`KeyValueStore`]: `get` / `set` by string key, implemented by
//!   [`RestStore`] (Redis REST endpoint) and [`InMemoryStore`] (tests, local
//!   runs).
//! - [`schema`]: the `user:{normalized-name}` and `user:{key}:password` key
//!   layout.
//! - [`UserRepository`]: user lookups, writes and password checks.
//!
//! ```
//! use std::sync::Arc;
//! use store::{InMemoryStore, UserRepository};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let repo = UserRepository::new(Arc::new(InMemoryStore::new()));
//! repo.set_user("Emily Kwan").await.unwrap();
//! let user = repo.find_user_by_full_name("emily kwan").await.unwrap().unwrap();
//! assert_eq!(user.full_name, "Emily Kwan");
//! # }
//! ```

mod backend;
mod error;
mod rest;
pub mod schema;
mod users;

pub use crate::backend::{InMemoryStore, KeyValueStore, StoreConfig, PING_KEY};
pub use crate::error::StoreError;
pub use crate::rest::RestStore;
pub use crate::schema::User;
pub use crate::users::UserRepository;
