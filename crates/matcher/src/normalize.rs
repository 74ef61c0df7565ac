//! Normalization shared by the query and every candidate.

/// Lower-cases `text`, trims it and collapses each run of Unicode
/// whitespace into a single ASCII space.
///
/// Only used for comparison; callers never see the normalized form.
///
/// ```
/// use matcher::normalize_for_search;
///
/// assert_eq!(normalize_for_search("  Emily \t  KWAN "), "emily kwan");
/// assert_eq!(normalize_for_search("   "), "");
/// ```
pub fn normalize_for_search(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.extend(segment.chars().flat_map(char::to_lowercase));
    }
    normalized
}

/// Splits a normalized string into its words, dropping empty tokens.
pub(crate) fn words(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|word| !word.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(normalize_for_search("Arden\n\n Chew"), "arden chew");
        assert_eq!(normalize_for_search("Arden\u{00A0}Chew"), "arden chew");
        assert_eq!(normalize_for_search("\tARDEN\r\nCHEW\t"), "arden chew");
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(normalize_for_search(""), "");
        assert_eq!(normalize_for_search(" \n\t "), "");
    }

    #[test]
    fn lowercases_non_ascii() {
        assert_eq!(normalize_for_search("ÉLODIE Åberg"), "élodie åberg");
    }

    #[test]
    fn words_skip_empty_tokens() {
        assert_eq!(words("emily kwan"), vec!["emily", "kwan"]);
        assert!(words("").is_empty());
    }
}
