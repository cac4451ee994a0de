use regex::Regex;

/// Pattern for the word-like runs of a search term. `\w` is Unicode-aware;
/// the CJK block is listed explicitly so ideographs always form tokens.
pub(crate) const TOKEN_PATTERN: &str = r"[\w一-鿿]+";

/// Case-insensitive folder-name filter built from a free-text term.
///
/// A name matches when it contains the whole term, or when it contains any
/// single token of the term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
    tokens: Vec<String>,
}

impl SearchFilter {
    /// Builds a filter; returns `None` for a blank term.
    pub fn new(term: &str, token_pattern: &Regex) -> Option<Self> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        let tokens = token_pattern
            .find_iter(&term)
            .map(|m| m.as_str().to_string())
            .collect();
        Some(Self { term, tokens })
    }

    /// The normalized term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Tokens extracted from the term.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        name.contains(&self.term) || self.tokens.iter().any(|t| name.contains(t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(term: &str) -> Option<SearchFilter> {
        SearchFilter::new(term, &Regex::new(TOKEN_PATTERN).unwrap())
    }

    #[test]
    fn blank_terms_yield_no_filter() {
        assert!(filter("").is_none());
        assert!(filter("   ").is_none());
    }

    #[test]
    fn direct_match_is_case_insensitive() {
        let f = filter("Breaking").unwrap();
        assert!(f.matches("breaking.bad.S01.1080p"));
        assert!(f.matches("BREAKING BAD"));
        assert!(!f.matches("Better Call Saul"));
    }

    #[test]
    fn cjk_prefix_matches() {
        let f = filter("权力").unwrap();
        assert!(f.matches("权力的游戏.S01"));
    }

    #[test]
    fn any_token_is_enough() {
        let f = filter("game thrones").unwrap();
        assert_eq!(f.tokens(), ["game", "thrones"]);
        assert!(f.matches("Game.of.Thrones.S01"));
        assert!(f.matches("A Thrones Story"));
        assert!(!f.matches("Westworld"));
    }

    #[test]
    fn punctuation_splits_tokens() {
        let f = filter("游戏.S01").unwrap();
        assert_eq!(f.tokens(), ["游戏", "s01"]);
        assert!(f.matches("权力的游戏.S01"));
        assert!(f.matches("另一个游戏"));
    }

    #[test]
    fn term_is_trimmed() {
        let f = filter("  dune ").unwrap();
        assert_eq!(f.term(), "dune");
        assert!(f.matches("Dune.Part.Two.2024"));
    }
}
