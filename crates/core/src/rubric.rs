//! Pitch-deck section rubric.
//!
//! The rubric is plain data: an ordered table of sections, each with
//! trigger keywords and an improvement tip. [`Rubric`] compiles the table
//! once and answers a single question per section, whether the text covers
//! it. Both the aggregate score and the per-section breakdown are derived
//! from that one answer.

use crate::types::SectionResult;
use regex::Regex;
use std::sync::LazyLock;

/// A named rubric entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCriterion {
    pub name: &'static str,
    /// Trigger keywords, checked in order.
    pub keywords: &'static [&'static str],
    pub tip: &'static str,
}

/// The sections investors expect in a pitch deck, in presentation order.
pub static SECTION_CRITERIA: &[SectionCriterion] = &[
    SectionCriterion {
        name: "The Problem",
        keywords: &["problem", "challenge", "pain point", "unmet need"],
        tip: "Clearly state the problem or unmet need your startup addresses.",
    },
    SectionCriterion {
        name: "The Solution",
        keywords: &["solution", "product", "platform", "our technology", "we solve"],
        tip: "Describe your solution and how it addresses the problem.",
    },
    SectionCriterion {
        name: "Market Size (TAM/SAM/SOM)",
        keywords: &["market size", "tam", "sam", "som", "billion", "million", "industry"],
        tip: "Quantify the market opportunity (TAM/SAM/SOM).",
    },
    SectionCriterion {
        name: "Product/Demo",
        keywords: &["how it works", "demo", "product features", "technology"],
        tip: "Showcase your product, demo, or technology.",
    },
    SectionCriterion {
        name: "Traction & Metrics",
        keywords: &["traction", "users", "revenue", "growth", "mrr", "arr", "kpi", "metrics"],
        tip: "Highlight traction, growth, and key metrics.",
    },
    SectionCriterion {
        name: "Business Model",
        keywords: &["business model", "monetization", "pricing", "how we make money"],
        tip: "Explain how your startup makes money.",
    },
    SectionCriterion {
        name: "Competitive Landscape",
        keywords: &["competitors", "competition", "unique advantage", "moat", "differentiator"],
        tip: "Describe your competitors and your unique advantage.",
    },
    SectionCriterion {
        name: "The Team",
        keywords: &["team", "founders", "ceo", "cto", "advisors", "experience"],
        tip: "Introduce your core team and their expertise.",
    },
    SectionCriterion {
        name: "The Ask & Use of Funds",
        keywords: &["ask", "seeking", "raising", "investment", "use of funds"],
        tip: "State your funding ask and how you will use the funds.",
    },
];

static STANDARD_RUBRIC: LazyLock<Rubric> = LazyLock::new(|| Rubric::new(SECTION_CRITERIA));

/// How a single keyword is looked for.
#[derive(Debug)]
enum KeywordMatcher {
    /// Single word: case-insensitive, on word boundaries, in the raw text.
    Word(Regex),
    /// Phrase: substring of the lowercased text.
    Phrase(String),
}

impl KeywordMatcher {
    fn compile(keyword: &str) -> Self {
        if keyword.split_whitespace().count() == 1 {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(keyword));
            match Regex::new(&pattern) {
                Ok(regex) => return Self::Word(regex),
                Err(e) => {
                    log::warn!("Keyword '{}' falls back to substring matching: {}", keyword, e);
                }
            }
        }
        Self::Phrase(keyword.to_lowercase())
    }

    fn is_match(&self, raw: &str, lowered: &str) -> bool {
        match self {
            Self::Word(regex) => regex.is_match(raw),
            Self::Phrase(phrase) => lowered.contains(phrase.as_str()),
        }
    }
}

#[derive(Debug)]
struct CompiledCriterion {
    criterion: SectionCriterion,
    matchers: Vec<KeywordMatcher>,
}

/// Coverage decision for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCoverage {
    pub criterion: SectionCriterion,
    pub covered: bool,
}

/// Aggregate rubric outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionScore {
    /// Covered sections out of all sections, scaled to 0-10, one decimal.
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Tips of the uncovered sections.
    pub tips: Vec<String>,
}

/// A compiled rubric.
#[derive(Debug)]
pub struct Rubric {
    criteria: Vec<CompiledCriterion>,
}

impl Rubric {
    /// Compile a rubric from a criteria table.
    pub fn new(criteria: &[SectionCriterion]) -> Self {
        Self {
            criteria: criteria
                .iter()
                .map(|c| CompiledCriterion {
                    criterion: *c,
                    matchers: c.keywords.iter().map(|k| KeywordMatcher::compile(k)).collect(),
                })
                .collect(),
        }
    }

    /// The nine-section pitch-deck rubric, compiled once per process.
    pub fn standard() -> &'static Rubric {
        &STANDARD_RUBRIC
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Decide, for every section in order, whether `text` covers it.
    ///
    /// A section is covered by its first matching keyword; the rest are
    /// not checked.
    pub fn coverage(&self, text: &str) -> Vec<SectionCoverage> {
        let lowered = text.to_lowercase();
        self.criteria
            .iter()
            .map(|compiled| SectionCoverage {
                criterion: compiled.criterion,
                covered: compiled.matchers.iter().any(|m| m.is_match(text, &lowered)),
            })
            .collect()
    }

    /// Score `text` against the rubric.
    pub fn score_sections(&self, text: &str) -> SectionScore {
        let coverage = self.coverage(text);
        let mut result = SectionScore {
            score: 0.0,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            tips: Vec::new(),
        };

        let mut points = 0usize;
        for section in &coverage {
            if section.covered {
                points += 1;
                result.strengths.push(section.criterion.name.to_string());
            } else {
                result.weaknesses.push(section.criterion.name.to_string());
                result.tips.push(section.criterion.tip.to_string());
            }
        }

        if !coverage.is_empty() {
            let raw = points as f64 / coverage.len() as f64 * 10.0;
            result.score = (raw * 10.0).round() / 10.0;
        }

        result
    }

    /// Per-section results for the report.
    pub fn section_breakdown(&self, text: &str) -> Vec<SectionResult> {
        self.coverage(text)
            .into_iter()
            .map(|s| SectionResult::new(s.criterion.name, s.criterion.tip, s.covered))
            .collect()
    }
}
