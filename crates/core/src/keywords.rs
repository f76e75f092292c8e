//! Keyword extraction using TF-IDF weighting.
//!
//! The analyzed document is the whole corpus, so inverse document
//! frequency is the same for every term and the ranking reduces to term
//! frequency. The vectorizer is still fitted the general way so that
//! weights stay comparable if more documents are ever supplied.

use crate::error::{Error, Result};
use crate::stopwords::is_vectorizer_stopword;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Default number of keywords reported.
pub const DEFAULT_MAX_FEATURES: usize = 15;

/// Tokens of two or more word characters.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// A weighted vocabulary term.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTerm {
    pub term: String,
    /// Raw count across the corpus.
    pub frequency: usize,
    /// L2-normalized TF-IDF weight.
    pub weight: f64,
}

/// Picks the most salient terms of a text.
#[derive(Debug, Clone)]
pub struct KeywordSummarizer {
    /// Maximum number of terms kept in the vocabulary.
    max_features: usize,
}

impl Default for KeywordSummarizer {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl KeywordSummarizer {
    /// Create a summarizer reporting the default 15 keywords.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of keywords reported.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Top keywords of `text`, alphabetical.
    ///
    /// Returns an empty list when nothing is left to weight.
    pub fn top_keywords(&self, text: &str) -> Vec<String> {
        match self.fit(&[text]) {
            Ok(terms) => terms.into_iter().map(|t| t.term).collect(),
            Err(e) => {
                log::debug!("No keywords extracted: {}", e);
                Vec::new()
            }
        }
    }

    /// Build the limited vocabulary over `documents` with TF-IDF weights.
    ///
    /// Terms are limited to the `max_features` most frequent (ties broken
    /// alphabetically) and returned in alphabetical order, weighted for
    /// the first document.
    pub fn fit(&self, documents: &[&str]) -> Result<Vec<WeightedTerm>> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let mut frequency: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                *frequency.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *document_frequency.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        if frequency.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n_documents = documents.len() as f64;
        let first = tokenized.first().map(Vec::as_slice).unwrap_or(&[]);

        let raw: Vec<f64> = ranked
            .iter()
            .map(|(term, _)| {
                let tf = first.iter().filter(|t| t.as_str() == *term).count() as f64;
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                // Smoothed IDF = ln((N + 1) / (df + 1)) + 1
                let idf = ((n_documents + 1.0) / (df + 1.0)).ln() + 1.0;
                tf * idf
            })
            .collect();

        let norm = raw.iter().map(|w| w * w).sum::<f64>().sqrt();

        Ok(ranked
            .into_iter()
            .zip(raw)
            .map(|((term, count), weight)| WeightedTerm {
                term: term.to_string(),
                frequency: count,
                weight: if norm > 0.0 { weight / norm } else { 0.0 },
            })
            .collect())
    }
}

/// Lowercase word tokens of length two or more, minus stop words.
fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_vectorizer_stopword(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("The Market is a $5B opportunity, I think."),
            vec!["market", "5b", "opportunity", "think"]
        );
    }

    #[test]
    fn test_top_keywords_alphabetical() {
        let summarizer = KeywordSummarizer::new();
        let keywords = summarizer.top_keywords("revenue growth team revenue market");
        assert_eq!(keywords, vec!["growth", "market", "revenue", "team"]);
    }

    #[test]
    fn test_limit_keeps_most_frequent() {
        let summarizer = KeywordSummarizer::new().with_max_features(2);
        let keywords = summarizer.top_keywords("zebra zebra zebra apple mango mango");
        assert_eq!(keywords, vec!["mango", "zebra"]);
    }

    #[test]
    fn test_limit_ties_broken_alphabetically() {
        let summarizer = KeywordSummarizer::new().with_max_features(2);
        let keywords = summarizer.top_keywords("delta charlie bravo alpha");
        assert_eq!(keywords, vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_bound_of_fifteen() {
        let text = (0..40)
            .map(|i| format!("term{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let keywords = KeywordSummarizer::new().top_keywords(&text);
        assert_eq!(keywords.len(), 15);
    }

    #[test]
    fn test_large_vocabulary() {
        let mut text = (0..50_000)
            .map(|i| format!("term{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        text.push_str(" revenue revenue");

        let keywords = KeywordSummarizer::new().top_keywords(&text);
        assert_eq!(keywords.len(), 15);
        assert!(keywords.contains(&"revenue".to_string()));
        assert!(keywords.contains(&"term0".to_string()));
    }

    #[test]
    fn test_empty_and_stopword_only_input() {
        let summarizer = KeywordSummarizer::new();
        assert!(summarizer.top_keywords("").is_empty());
        assert!(summarizer.top_keywords("the and of however").is_empty());
        assert!(matches!(
            summarizer.fit(&["a an the"]),
            Err(Error::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_weights_are_normalized() {
        let terms = KeywordSummarizer::new()
            .fit(&["growth growth growth market"])
            .unwrap();
        assert_eq!(terms.len(), 2);
        let norm: f64 = terms.iter().map(|t| t.weight * t.weight).sum();
        assert!((norm - 1.0).abs() < 1e-9);
        assert_eq!(terms[0].term, "growth");
        assert_eq!(terms[0].frequency, 3);
        assert!(terms[0].weight > terms[1].weight);
    }
}
