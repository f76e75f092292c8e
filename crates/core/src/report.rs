//! Report composition.
//!
//! Runs every scorer over the extracted text and assembles the final
//! [`AnalysisReport`].

use crate::keywords::{KeywordSummarizer, DEFAULT_MAX_FEATURES};
use crate::normalize::TextNormalizer;
use crate::readability::readability;
use crate::rubric::Rubric;
use crate::sentiment::SentimentAnalyzer;
use crate::types::{AnalysisReport, MaturityLevel};

/// Builds analysis reports from extracted text.
#[derive(Debug, Clone)]
pub struct ReportComposer {
    normalizer: TextNormalizer,
    summarizer: KeywordSummarizer,
    sentiment: SentimentAnalyzer,
    rubric: &'static Rubric,
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            summarizer: KeywordSummarizer::new().with_max_features(DEFAULT_MAX_FEATURES),
            sentiment: SentimentAnalyzer::new(),
            rubric: Rubric::standard(),
        }
    }
}

impl ReportComposer {
    /// Create a composer with the standard rubric and 15 keywords.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of keywords reported.
    pub fn with_keyword_limit(mut self, limit: usize) -> Self {
        self.summarizer = self.summarizer.with_max_features(limit);
        self
    }

    /// Analyze extracted text.
    ///
    /// Keywords come from the normalized text; every other measure reads
    /// the raw text. Empty text still yields a complete report.
    pub fn compose(&self, text: &str) -> AnalysisReport {
        let normalized = self.normalizer.normalize(text);
        let keywords = self.summarizer.top_keywords(&normalized);
        let sentiment = self.sentiment.polarity_scores(text);
        let readability = readability(text);
        let score = self.rubric.score_sections(text);
        let sections = self.rubric.section_breakdown(text);

        let maturity_level = MaturityLevel::from_score(score.score);
        log::debug!(
            "Composed report: score {} ({}), {} keywords, readability {:?}",
            score.score,
            maturity_level,
            keywords.len(),
            readability
        );

        AnalysisReport {
            keywords,
            sentiment,
            readability,
            section_score: score.score,
            strengths: score.strengths,
            weaknesses: score.weaknesses,
            tips: score.tips,
            raw_text: text.to_string(),
            maturity_level,
            investor_feedback: maturity_level.investor_feedback().to_string(),
            sections,
        }
    }
}
