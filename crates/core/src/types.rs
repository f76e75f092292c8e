//! Domain types for documents and analysis reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strength recorded for a rubric section whose keywords were found.
pub const MATCHED_STRENGTH: u8 = 5;

/// Strength recorded for a rubric section with no matching keyword.
pub const UNMATCHED_STRENGTH: u8 = 2;

/// The format of an uploaded pitch deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
    /// Modern PPTX (Office Open XML) slide deck.
    SlideDeck,
    /// DOCX (Office Open XML) word-processor document.
    WordDoc,
    /// UTF-8 plain text.
    PlainText,
}

impl DocumentFormat {
    /// Parse a format tag.
    ///
    /// Accepts file extensions with or without the leading dot
    /// (`pdf`, `.pptx`, `docx`, `txt`) and the descriptive names
    /// (`slide-deck`, `word-doc`, `plain-text`). Matching ignores case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        let tag = tag.strip_prefix('.').unwrap_or(tag);
        match tag.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "pptx" | "slide-deck" => Some(Self::SlideDeck),
            "docx" | "word-doc" => Some(Self::WordDoc),
            "txt" | "plain-text" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// The file extension uploads of this format carry.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::SlideDeck => "pptx",
            Self::WordDoc => "docx",
            Self::PlainText => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "pdf",
            Self::SlideDeck => "slide-deck",
            Self::WordDoc => "word-doc",
            Self::PlainText => "plain-text",
        };
        f.write_str(name)
    }
}

/// Flattened text pulled out of a document.
///
/// An empty value means nothing could be extracted, whether because the
/// document had no text, the format was unknown, or parsing failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    /// Wrap extracted text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The value used when extraction produced nothing.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether extraction produced no text.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Polarity distribution of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Share of negative valence, in [0, 1].
    pub neg: f64,
    /// Share of neutral tokens, in [0, 1].
    pub neu: f64,
    /// Share of positive valence, in [0, 1].
    pub pos: f64,
    /// Normalized overall polarity, in [-1, 1].
    pub compound: f64,
}

/// Outcome of one rubric section for the per-section breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionResult {
    /// Section name as declared in the rubric.
    pub name: String,

    /// 5 when the section was covered, 2 otherwise.
    pub strength: u8,

    /// Empty when covered, otherwise a single "Missing: <name>" message.
    pub missing: Vec<String>,

    /// The section's improvement tip.
    pub suggestion: String,
}

impl SectionResult {
    /// Build the result for a section given whether it was covered.
    pub fn new(name: &str, tip: &str, matched: bool) -> Self {
        Self {
            name: name.to_string(),
            strength: if matched {
                MATCHED_STRENGTH
            } else {
                UNMATCHED_STRENGTH
            },
            missing: if matched {
                Vec::new()
            } else {
                vec![format!("Missing: {}", name)]
            },
            suggestion: tip.to_string(),
        }
    }

    /// Whether the section was covered.
    pub fn matched(&self) -> bool {
        self.strength == MATCHED_STRENGTH
    }
}

/// Investor-readiness tier derived from the section score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaturityLevel {
    #[serde(rename = "Beginner")]
    Beginner,
    #[serde(rename = "Pre-seed Ready")]
    PreSeedReady,
    #[serde(rename = "Seed Ready")]
    SeedReady,
    #[serde(rename = "Series A Ready")]
    SeriesAReady,
}

impl MaturityLevel {
    /// Map a section score to a tier. Thresholds are checked from the top.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::SeriesAReady
        } else if score >= 6.0 {
            Self::SeedReady
        } else if score >= 4.0 {
            Self::PreSeedReady
        } else {
            Self::Beginner
        }
    }

    /// Human-readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::PreSeedReady => "Pre-seed Ready",
            Self::SeedReady => "Seed Ready",
            Self::SeriesAReady => "Series A Ready",
        }
    }

    /// Fixed investor feedback for this tier.
    pub fn investor_feedback(&self) -> &'static str {
        match self {
            Self::SeriesAReady => {
                "Impressive! Your pitch covers all key areas investors look for."
            }
            Self::SeedReady => {
                "Good job! Strengthen your business model and traction sections for more impact."
            }
            Self::PreSeedReady => {
                "You have the basics. Clarify your problem, solution, and market size for investors."
            }
            Self::Beginner => {
                "Your pitch is missing several key sections. Focus on clearly stating the problem, solution, and team."
            }
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full assessment of one pitch deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Salient terms of the normalized text, alphabetical.
    pub keywords: Vec<String>,

    /// Polarity of the raw text.
    pub sentiment: Sentiment,

    /// Flesch reading ease, or None when it could not be computed.
    pub readability: Option<f64>,

    /// Rubric coverage on a 0-10 scale, one decimal.
    pub section_score: f64,

    /// Names of covered rubric sections, in rubric order.
    pub strengths: Vec<String>,

    /// Names of uncovered rubric sections, in rubric order.
    pub weaknesses: Vec<String>,

    /// Tips for the uncovered sections, in rubric order.
    pub tips: Vec<String>,

    /// The extracted text, verbatim.
    pub raw_text: String,

    pub maturity_level: MaturityLevel,

    pub investor_feedback: String,

    /// Per-section breakdown, in rubric order.
    pub sections: Vec<SectionResult>,
}

impl AnalysisReport {
    /// Render the plain-text summary kept in analysis history.
    pub fn summary(&self, filename: &str) -> String {
        let readability = self
            .readability
            .map(|r| r.to_string())
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            "Pitch Analysis for {}\n\n\
             Section Coverage: {}/10\n\
             Readability: {}\n\
             Sentiment: neg={}, neu={}, pos={}, compound={}\n\n\
             Strengths: {}\n\
             Weaknesses: {}\n\
             Tips: {}\n\
             Keywords: {}\n",
            filename,
            self.section_score,
            readability,
            self.sentiment.neg,
            self.sentiment.neu,
            self.sentiment.pos,
            self.sentiment.compound,
            self.strengths.join(", "),
            self.weaknesses.join(", "),
            self.tips.join(", "),
            self.keywords.join(", "),
        )
    }

    /// The first `limit` characters of the raw text, with "..." appended
    /// when it was cut short.
    pub fn preview(&self, limit: usize) -> String {
        let mut chars = self.raw_text.chars();
        let head: String = chars.by_ref().take(limit).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }

    /// Whether extraction failed to produce any text.
    pub fn is_extraction_empty(&self) -> bool {
        self.raw_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_tag() {
        assert_eq!(DocumentFormat::from_tag("pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_tag(".PPTX"), Some(DocumentFormat::SlideDeck));
        assert_eq!(DocumentFormat::from_tag("docx"), Some(DocumentFormat::WordDoc));
        assert_eq!(DocumentFormat::from_tag(".txt"), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::from_tag("slide-deck"), Some(DocumentFormat::SlideDeck));
        assert_eq!(DocumentFormat::from_tag("word-doc"), Some(DocumentFormat::WordDoc));
        assert_eq!(DocumentFormat::from_tag("plain-text"), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::from_tag("xlsx"), None);
        assert_eq!(DocumentFormat::from_tag("ppt"), None);
        assert_eq!(DocumentFormat::from_tag(""), None);
    }

    #[test]
    fn test_format_extension() {
        for format in [
            DocumentFormat::Pdf,
            DocumentFormat::SlideDeck,
            DocumentFormat::WordDoc,
            DocumentFormat::PlainText,
        ] {
            assert_eq!(DocumentFormat::from_tag(format.extension()), Some(format));
            assert_eq!(DocumentFormat::from_tag(&format.to_string()), Some(format));
        }
    }

    #[test]
    fn test_maturity_mapping() {
        assert_eq!(MaturityLevel::from_score(10.0), MaturityLevel::SeriesAReady);
        assert_eq!(MaturityLevel::from_score(8.9), MaturityLevel::SeriesAReady);
        assert_eq!(MaturityLevel::from_score(7.8), MaturityLevel::SeedReady);
        assert_eq!(MaturityLevel::from_score(6.7), MaturityLevel::SeedReady);
        assert_eq!(MaturityLevel::from_score(5.6), MaturityLevel::PreSeedReady);
        assert_eq!(MaturityLevel::from_score(4.4), MaturityLevel::PreSeedReady);
        assert_eq!(MaturityLevel::from_score(3.3), MaturityLevel::Beginner);
        assert_eq!(MaturityLevel::from_score(0.0), MaturityLevel::Beginner);
    }

    #[test]
    fn test_maturity_serializes_as_label() {
        let json = serde_json::to_string(&MaturityLevel::PreSeedReady).unwrap();
        assert_eq!(json, "\"Pre-seed Ready\"");
        let json = serde_json::to_string(&MaturityLevel::SeriesAReady).unwrap();
        assert_eq!(json, "\"Series A Ready\"");
    }

    #[test]
    fn test_section_result() {
        let found = SectionResult::new("The Team", "Introduce your team.", true);
        assert_eq!(found.strength, 5);
        assert!(found.missing.is_empty());
        assert!(found.matched());

        let missing = SectionResult::new("The Team", "Introduce your team.", false);
        assert_eq!(missing.strength, 2);
        assert_eq!(missing.missing, vec!["Missing: The Team"]);
        assert_eq!(missing.suggestion, "Introduce your team.");
        assert!(!missing.matched());
    }

    fn sample_report(raw_text: &str) -> AnalysisReport {
        AnalysisReport {
            keywords: vec!["growth".to_string(), "team".to_string()],
            sentiment: Sentiment {
                neg: 0.0,
                neu: 0.8,
                pos: 0.2,
                compound: 0.4404,
            },
            readability: None,
            section_score: 2.2,
            strengths: vec!["The Team".to_string(), "Traction & Metrics".to_string()],
            weaknesses: vec!["The Problem".to_string()],
            tips: vec!["State the problem.".to_string()],
            raw_text: raw_text.to_string(),
            maturity_level: MaturityLevel::Beginner,
            investor_feedback: MaturityLevel::Beginner.investor_feedback().to_string(),
            sections: Vec::new(),
        }
    }

    #[test]
    fn test_summary() {
        let summary = sample_report("text").summary("deck.pdf");
        assert!(summary.starts_with("Pitch Analysis for deck.pdf\n\n"));
        assert!(summary.contains("Section Coverage: 2.2/10\n"));
        assert!(summary.contains("Readability: n/a\n"));
        assert!(summary.contains("Sentiment: neg=0, neu=0.8, pos=0.2, compound=0.4404\n"));
        assert!(summary.contains("Strengths: The Team, Traction & Metrics\n"));
        assert!(summary.contains("Keywords: growth, team\n"));
    }

    #[test]
    fn test_preview() {
        let report = sample_report("abcdef");
        assert_eq!(report.preview(3), "abc...");
        assert_eq!(report.preview(6), "abcdef");
        assert_eq!(report.preview(100), "abcdef");
    }

    #[test]
    fn test_report_json_shape() {
        let value = serde_json::to_value(sample_report("")).unwrap();
        let object = value.as_object().unwrap();
        for field in [
            "keywords",
            "sentiment",
            "readability",
            "section_score",
            "strengths",
            "weaknesses",
            "tips",
            "raw_text",
            "maturity_level",
            "investor_feedback",
            "sections",
        ] {
            assert!(object.contains_key(field), "missing field {}", field);
        }
        assert!(object["readability"].is_null());
        assert_eq!(object["maturity_level"], "Beginner");
        assert_eq!(object.len(), 11);
    }
}
