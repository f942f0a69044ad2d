//! Comma-separated list handling.
//!
//! The loader hands the descriptor raw strings such as `"required, mask"`.
//! A [`TokenList`] keeps that raw string together with its tokenization so
//! the two can be published as a single value and never disagree.

use std::slice;

/// Splits `spec` on commas, trims every segment and drops the empty ones.
///
/// Order and duplicates are preserved.
///
/// ```
/// use verdict_action::tokens::tokenize;
///
/// assert_eq!(tokenize("a, b ,,c"), vec!["a", "b", "c"]);
/// ```
pub fn tokenize(spec: &str) -> Vec<String> {
    spec.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A raw comma-separated spec and its tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    raw: String,
    tokens: Vec<String>,
}

impl TokenList {
    /// Tokenize `raw` and keep both.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let tokens = tokenize(&raw);
        Self { raw, tokens }
    }

    /// The string this list was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The tokens, in declaration order.
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Iterate over the tokens.
    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.tokens.iter()
    }

    /// Exact, post-trim membership test.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Number of tokens, duplicates included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the raw spec had no non-blank segment.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
