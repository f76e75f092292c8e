//! Text normalization for keyword weighting.
//!
//! Lowercases, collapses whitespace, strips punctuation, drops stop words
//! and reduces each remaining word to its lemma.

use crate::lemma::lemmatize;
use crate::stopwords::is_normalizer_stopword;
use regex::Regex;
use std::sync::LazyLock;

/// Regex to collapse whitespace runs (including newlines) into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Text normalizer applied before keyword extraction.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Whether to drop stop words.
    remove_stopwords: bool,

    /// Whether to reduce words to their lemma.
    lemmatize: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
            lemmatize: true,
        }
    }
}

impl TextNormalizer {
    /// Create a new text normalizer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether stop words are dropped.
    pub fn with_remove_stopwords(mut self, remove: bool) -> Self {
        self.remove_stopwords = remove;
        self
    }

    /// Set whether words are reduced to their lemma.
    pub fn with_lemmatize(mut self, lemmatize: bool) -> Self {
        self.lemmatize = lemmatize;
        self
    }

    /// Normalize a text.
    ///
    /// - Lowercases everything
    /// - Collapses whitespace runs to single spaces
    /// - Removes ASCII punctuation, including apostrophes ("don't" -> "dont")
    /// - Drops stop words
    /// - Lemmatizes what remains
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let collapsed = WHITESPACE_COLLAPSE_REGEX.replace_all(&lowered, " ");
        let stripped: String = collapsed
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        stripped
            .split_whitespace()
            .filter(|w| !(self.remove_stopwords && is_normalizer_stopword(w)))
            .map(|w| {
                if self.lemmatize {
                    lemmatize(w)
                } else {
                    w.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize("Hello, World!"), "hello world");
        assert_eq!(normalizer.normalize("Revenue: $2M (ARR)."), "revenue 2m arr");
    }

    #[test]
    fn test_apostrophes_are_stripped_after_stopword_check() {
        let normalizer = TextNormalizer::new();

        // "don't" loses its apostrophe before the stop-word lookup, so the
        // resulting "dont" is kept.
        assert_eq!(normalizer.normalize("We don't stop"), "dont stop");
    }

    #[test]
    fn test_collapse_whitespace() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer.normalize("  market\n\n  size\t\tgrowth  "),
            "market size growth"
        );
    }

    #[test]
    fn test_remove_stopwords() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer.normalize("This is the problem we are solving"),
            "problem solving"
        );
        assert_eq!(normalizer.normalize("the and of to"), "");
    }

    #[test]
    fn test_lemmatize() {
        let normalizer = TextNormalizer::new();

        assert_eq!(
            normalizer.normalize("Our founders met investors from companies"),
            "founder met investor company"
        );
    }

    #[test]
    fn test_options() {
        let normalizer = TextNormalizer::new()
            .with_remove_stopwords(false)
            .with_lemmatize(false);

        assert_eq!(normalizer.normalize("The Founders"), "the founders");
    }

    #[test]
    fn test_empty_input() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   \n\t "), "");
        assert_eq!(normalizer.normalize("!!! ..."), "");
    }
}
