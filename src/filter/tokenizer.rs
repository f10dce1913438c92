//! Query normalization and tokenization.

use serde::Serialize;

/// Default minimum token length in characters; shorter words are noise.
pub const DEFAULT_MIN_TOKEN_CHARS: usize = 3;

/// Lowercase and trim a keyword. Idempotent.
#[must_use]
pub fn normalize(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// Split a normalized keyword on whitespace, keeping words of at least
/// `min_chars` characters.
#[must_use]
pub fn tokenize(normalized: &str, min_chars: usize) -> Vec<String> {
    normalized
        .split_whitespace()
        .filter(|word| word.chars().count() >= min_chars)
        .map(str::to_string)
        .collect()
}

/// A free-text keyword in raw and normalized form, with its significant tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterQuery {
    raw: String,
    normalized: String,
    tokens: Vec<String>,
}

impl FilterQuery {
    #[must_use]
    pub fn new(keyword: &str, min_token_chars: usize) -> Self {
        let normalized = normalize(keyword);
        let tokens = tokenize(&normalized, min_token_chars);
        Self {
            raw: keyword.to_string(),
            normalized,
            tokens,
        }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// No significant token survived; every listing is a candidate.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn is_single_token(&self) -> bool {
        self.tokens.len() == 1
    }

    /// Whether any token occurs in `haystack` (already lowercase).
    #[must_use]
    pub fn any_token_in(&self, haystack: &str) -> bool {
        self.tokens.iter().any(|t| haystack.contains(t.as_str()))
    }
}
