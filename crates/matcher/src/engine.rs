use std::cmp::Ordering;

use crate::normalize::{normalize_for_search, words};
use crate::types::{MatchCategory, MatchConfig, MatchError, NameMatch, Resolution};


/// Matcher over a fixed list of display names.
///
/// Holds a copy of the names and the scoring config so callers that search
/// the same directory repeatedly do not have to pass both every time. The
/// free functions [`search`], [`search_scored`] and [`resolve`] use the
/// default config.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    candidates: Vec<String>,
    config: MatchConfig,
}

impl NameMatcher {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            config: MatchConfig::default(),
        }
    }

    /// Construct a matcher with an explicit, validated config.
    pub fn with_config<I, S>(candidates: I, config: MatchConfig) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        config.validate()?;
        Ok(Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            config,
        })
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn search(&self, query: &str) -> Vec<String> {
        into_names(self.search_scored(query))
    }

    pub fn search_scored(&self, query: &str) -> Vec<NameMatch> {
        rank_candidates(query, &self.candidates, &self.config)
    }

    pub fn resolve(&self, query: &str) -> Resolution {
        Resolution::from(self.search(query))
    }
}

/// Ranks `candidates` against `query` and returns the original names, best
/// first. An exact (normalized) match returns only that name.
pub fn search<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<String> {
    into_names(search_scored(query, candidates))
}

/// Same as [`search`] but keeps each name's score and category.
pub fn search_scored<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<NameMatch> {
    rank_candidates(query, candidates, &MatchConfig::default())
}

/// Classifies the result of [`search`] as no match, resolved or ambiguous.
pub fn resolve<S: AsRef<str>>(query: &str, candidates: &[S]) -> Resolution {
    Resolution::from(search(query, candidates))
}

fn into_names(matches: Vec<NameMatch>) -> Vec<String> {
    matches.into_iter().map(|m| m.name).collect()
}

fn rank_candidates<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    cfg: &MatchConfig,
) -> Vec<NameMatch> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let normalized_query = normalize_for_search(query);
    let query_words = words(&normalized_query);
    let mut matches = Vec::new();

    for candidate in candidates {
        let original = candidate.as_ref();
        let normalized = normalize_for_search(original);

        if normalized == normalized_query {
            return vec![NameMatch::exact(original)];
        }

        let scored = score_substring(&normalized_query, &normalized)
            .or_else(|| score_words(&query_words, &words(&normalized), cfg));

        if let Some((score, category)) = scored {
            matches.push(NameMatch {
                name: original.to_string(),
                score,
                category,
            });
        }
    }

    rank(&mut matches, cfg.score_epsilon);
    matches
}

/// Full-substring score. Shorter containing candidates score higher; a
/// candidate swallowed by a longer query is penalised more.
fn score_substring(query: &str, candidate: &str) -> Option<(f64, MatchCategory)> {
    let query_len = query.chars().count() as f64;
    let candidate_len = candidate.chars().count() as f64;

    let score = if candidate.contains(query) {
        0.9 - (candidate_len - query_len) / 100.0
    } else if query.contains(candidate) {
        0.7 - (query_len - candidate_len) / 100.0
    } else {
        return None;
    };

    Some((score, MatchCategory::FullSubstring))
}

/// Word-level score. Each query word is credited at most once, against the
/// first candidate word that equals it or overlaps it as a substring.
fn score_words(
    query_words: &[&str],
    candidate_words: &[&str],
    cfg: &MatchConfig,
) -> Option<(f64, MatchCategory)> {
    if query_words.is_empty() || candidate_words.is_empty() {
        return None;
    }

    let mut exact = 0usize;
    let mut partial = 0usize;

    for query_word in query_words {
        for candidate_word in candidate_words {
            if candidate_word == query_word {
                exact += 1;
                break;
            }
            if candidate_word.contains(query_word) || query_word.contains(candidate_word) {
                partial += 1;
                break;
            }
        }
    }

    if exact == 0 && partial == 0 {
        return None;
    }

    let total = query_words.len().max(candidate_words.len()) as f64;
    let score = exact as f64 / total + cfg.partial_word_weight * (partial as f64 / total);

    if score < cfg.min_word_score {
        return None;
    }

    let category = if exact > 0 {
        MatchCategory::WordMatch
    } else {
        MatchCategory::PartialWord
    };

    Some((score, category))
}

/// Three-way ranking: score descending with `epsilon` tolerance, then
/// category priority, then shorter name.
fn compare(a: &NameMatch, b: &NameMatch, epsilon: f64) -> Ordering {
    if (a.score - b.score).abs() > epsilon {
        return b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
    }

    b.category
        .priority()
        .cmp(&a.category.priority())
        .then_with(|| a.name.chars().count().cmp(&b.name.chars().count()))
}

// The epsilon comparison is not transitive, so it cannot back `sort_by`
// (which requires a total order). Stable insertion sort over a handful of
// names keeps input order as the final tie-break.
fn rank(matches: &mut [NameMatch], epsilon: f64) {
    for i in 1..matches.len() {
        let mut j = i;
        while j > 0 && compare(&matches[j - 1], &matches[j], epsilon) == Ordering::Greater {
            matches.swap(j - 1, j);
            j -= 1;
        }
    }
}
