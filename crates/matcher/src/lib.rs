//! # Guest name matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` resolves a free-text name typed by a guest into one of a small,
//! fixed set of known display names ("Emily Kwan", "Arden Chew", ...). The
//! result feeds the sign-in flow: the chosen display name selects the user
//! key whose password is then checked against the key-value store.
//!
//! The candidate set is tens of names, not millions, so the engine is a
//! linear scan plus a sort. There is no index structure and no I/O.
//!
//! ## Matching rules
//!
//! Query and candidates are compared in their normalized form (trimmed,
//! lower-cased, whitespace runs collapsed to one space). Returned names are
//! always the caller's original strings.
//!
//! 1. An exact normalized match returns that single name immediately.
//! 2. Otherwise each candidate gets at most one record:
//!    - [`MatchCategory::FullSubstring`] when one string contains the other;
//!    - [`MatchCategory::WordMatch`] / [`MatchCategory::PartialWord`] from
//!      per-word correspondence, kept only when the word score reaches
//!      [`MatchConfig::min_word_score`].
//! 3. Records are ranked by score (scores within
//!    [`MatchConfig::score_epsilon`] tie), then category, then shorter name.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{search, resolve, Resolution};
//!
//! let names = ["Emily Kwan", "Arden Chew"];
//!
//! assert_eq!(search("EMILY   KWAN", &names), vec!["Emily Kwan".to_string()]);
//! assert!(search("   ", &names).is_empty());
//!
//! match resolve("kwan", &names) {
//!     Resolution::Resolved(name) => assert_eq!(name, "Emily Kwan"),
//!     other => panic!("unexpected resolution: {other:?}"),
//! }
//! ```

pub mod engine;
pub mod normalize;
pub mod types;

pub use crate::engine::{resolve, search, search_scored, NameMatcher};
pub use crate::normalize::normalize_for_search;
pub use crate::types::{MatchCategory, MatchConfig, MatchError, NameMatch, Resolution};
