//! Core domain types, text normalization, scoring and report composition
//! for pitch deck analysis.

pub mod error;
pub mod keywords;
pub mod lemma;
pub mod lexicon;
pub mod normalize;
pub mod readability;
pub mod report;
pub mod rubric;
pub mod sentiment;
pub mod stopwords;
pub mod types;

pub use error::{Error, Result};
pub use keywords::KeywordSummarizer;
pub use normalize::TextNormalizer;
pub use readability::readability;
pub use report::ReportComposer;
pub use rubric::{Rubric, SectionCriterion, SectionScore, SECTION_CRITERIA};
pub use sentiment::SentimentAnalyzer;
pub use types::{
    AnalysisReport, DocumentFormat, ExtractedText, MaturityLevel, SectionResult, Sentiment,
};
