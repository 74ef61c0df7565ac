//! Workspace umbrella crate for the wedding guest list.
//!
//! This crate ties the guest directory to the name matcher and the user
//! store so callers can sign a guest in with a single API entry point:
//!
//! ```
//! use std::sync::Arc;
//! use guestlist::{Directory, SignIn};
//! use store::InMemoryStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let store = InMemoryStore::with_entries([("user:emily_kwan:password", "sept24")]);
//! let sign_in = SignIn::new(Arc::new(Directory::builtin().unwrap()), Arc::new(store));
//!
//! let lookup = sign_in.resolve_name("em kwan").unwrap();
//! assert_eq!(lookup.display_name, "Emily Kwan");
//!
//! let user = sign_in.authenticate(&lookup.display_name, "sept24").await.unwrap();
//! assert_eq!(user.normalized_name, "emily kwan");
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod directory;
pub mod types;

pub use matcher::{MatchCategory, MatchConfig, NameMatch, NameMatcher, Resolution};
pub use store::{KeyValueStore, StoreConfig, StoreError, User, UserRepository};

pub use crate::auth::{AuthError, NameLookup, SignIn};
pub use crate::config::{BUILTIN_DIRECTORY, ConfigLoadError, DirectoryConfig, UserEntry};
pub use crate::directory::Directory;
pub use crate::types::{Event, Guest, Rsvp, RsvpEvent, RsvpResponse};
