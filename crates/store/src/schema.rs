//! User schema, version 1.
//!
//! - `user:{normalized-full-name}` holds the full name with its original
//!   capitalization, e.g. `user:john doe` → `"John Doe"`.
//! - `user:{user-key}:password` holds the password for a directory user key,
//!   e.g. `user:emily_kwan:password`.

use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: &str = "v1";

const USER_PREFIX: &str = "user:";
const PASSWORD_SUFFIX: &str = ":password";

/// A signed-in (or stored) user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub normalized_name: String,
    pub full_name: String,
}

impl User {
    pub fn from_full_name(full_name: &str) -> Self {
        Self {
            normalized_name: normalize_full_name(full_name),
            full_name: full_name.to_string(),
        }
    }
}

/// Lower-cases and trims a full name. Inner spacing is kept as typed.
pub fn normalize_full_name(full_name: &str) -> String {
    full_name.trim().to_lowercase()
}

/// `user:{normalized}` key for a full name.
pub fn create_user_key(full_name: &str) -> String {
    format!("{USER_PREFIX}{}", normalize_full_name(full_name))
}

/// Normalized name held by a `user:` key, or `None` for other keys.
pub fn parse_user_key(key: &str) -> Option<&str> {
    key.strip_prefix(USER_PREFIX)
}

/// A full name is valid when something is left after trimming.
pub fn validate_full_name(full_name: &str) -> bool {
    !full_name.trim().is_empty()
}

/// `user:{user_key}:password` key for a directory user key.
pub fn password_key(user_key: &str) -> String {
    format!("{USER_PREFIX}{user_key}{PASSWORD_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_full_name("  John Doe "), "john doe");
        assert_eq!(normalize_full_name("John  Doe"), "john  doe");
    }

    #[test]
    fn user_key_round_trip() {
        let key = create_user_key("John Doe");
        assert_eq!(key, "user:john doe");
        assert_eq!(parse_user_key(&key), Some("john doe"));
    }

    #[test]
    fn parse_rejects_foreign_keys() {
        assert_eq!(parse_user_key("guest:john doe"), None);
        assert_eq!(parse_user_key("user"), None);
        assert_eq!(parse_user_key("user:"), Some(""));
    }

    #[test]
    fn validate_requires_content() {
        assert!(validate_full_name("Emily Kwan"));
        assert!(!validate_full_name(""));
        assert!(!validate_full_name("   "));
    }

    #[test]
    fn password_key_format() {
        assert_eq!(password_key("emily_kwan"), "user:emily_kwan:password");
    }

    #[test]
    fn user_from_full_name() {
        let user = User::from_full_name("Arden Chew");
        assert_eq!(user.normalized_name, "arden chew");
        assert_eq!(user.full_name, "Arden Chew");
    }
}
