use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a candidate matched the query.
///
/// Variants are declared from strongest to weakest; [`MatchCategory::priority`]
/// is the tie-breaker used when two scores are within the ranking epsilon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MatchCategory {
    /// Normalized query equals the normalized candidate.
    Exact,
    /// One normalized string fully contains the other.
    FullSubstring,
    /// At least one query word equals a candidate word.
    WordMatch,
    /// Query words only overlap candidate words as substrings.
    PartialWord,
}

impl MatchCategory {
    /// Higher wins.
    pub fn priority(self) -> u8 {
        match self {
            MatchCategory::Exact => 4,
            MatchCategory::FullSubstring => 3,
            MatchCategory::WordMatch => 2,
            MatchCategory::PartialWord => 1,
        }
    }
}

/// A ranked candidate: the original display name with its score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NameMatch {
    /// Candidate string exactly as the caller supplied it.
    pub name: String,
    pub score: f64,
    pub category: MatchCategory,
}

impl NameMatch {
    pub(crate) fn exact(name: &str) -> Self {
        Self {
            name: name.to_string(),
            score: 1.0,
            category: MatchCategory::Exact,
        }
    }
}

/// Outcome of a search, as the sign-in flow consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing met the thresholds (or the query was blank).
    NoMatch,
    /// Exactly one name came back.
    Resolved(String),
    /// Several names, best first.
    Ambiguous(Vec<String>),
}

impl Resolution {
    /// Top-ranked name, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Resolution::NoMatch => None,
            Resolution::Resolved(name) => Some(name),
            Resolution::Ambiguous(names) => names.first().map(String::as_str),
        }
    }

    /// Every returned name in ranked order.
    pub fn candidates(&self) -> &[String] {
        match self {
            Resolution::NoMatch => &[],
            Resolution::Resolved(name) => std::slice::from_ref(name),
            Resolution::Ambiguous(names) => names,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Ambiguous(_))
    }
}

impl From<Vec<String>> for Resolution {
    fn from(mut ranked: Vec<String>) -> Self {
        match ranked.len() {
            0 => Resolution::NoMatch,
            1 => Resolution::Resolved(ranked.remove(0)),
            _ => Resolution::Ambiguous(ranked),
        }
    }
}

/// Scoring knobs. The defaults are the production values; tests and the
/// server may override them but must pass [`MatchConfig::validate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Scores closer than this are treated as equal when ranking.
    #[serde(default = "MatchConfig::default_score_epsilon")]
    pub score_epsilon: f64,
    /// Minimum word-level score for a candidate to be kept.
    #[serde(default = "MatchConfig::default_min_word_score")]
    pub min_word_score: f64,
    /// Weight applied to partial (substring) word matches.
    #[serde(default = "MatchConfig::default_partial_word_weight")]
    pub partial_word_weight: f64,
}

impl MatchConfig {
    pub(crate) fn default_score_epsilon() -> f64 {
        0.01
    }

    pub(crate) fn default_min_word_score() -> f64 {
        0.5
    }

    pub(crate) fn default_partial_word_weight() -> f64 {
        0.6
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.score_epsilon >= 0.0 && self.score_epsilon < 1.0) {
            return Err(MatchError::InvalidConfig(
                "score_epsilon must be in [0.0, 1.0)".into(),
            ));
        }
        if !(self.min_word_score > 0.0 && self.min_word_score <= 1.0) {
            return Err(MatchError::InvalidConfig(
                "min_word_score must be in (0.0, 1.0]".into(),
            ));
        }
        if !(self.partial_word_weight >= 0.0 && self.partial_word_weight <= 1.0) {
            return Err(MatchError::InvalidConfig(
                "partial_word_weight must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            score_epsilon: Self::default_score_epsilon(),
            min_word_score: Self::default_min_word_score(),
            partial_word_weight: Self::default_partial_word_weight(),
        }
    }
}

/// Errors produced by the matching layer. Searching itself never fails;
/// only building a matcher from a bad configuration does.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
}
