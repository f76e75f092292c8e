//! Rule-based sentiment scoring.
//!
//! Scores raw text with a valence lexicon plus heuristics for negation,
//! intensifiers, capitalization, contrast and punctuation, in the manner
//! of VADER. Works on unnormalized text because case and punctuation carry
//! signal.

use crate::lexicon::{BOOSTERS, LEXICON, NEGATIONS};
use crate::types::Sentiment;

/// Added to a word's valence when it is in ALL CAPS amid mixed-case text.
const CAPS_INCREMENT: f64 = 0.733;

/// Multiplier applied to a negated valence.
const NEGATION_SCALAR: f64 = -0.74;

/// Normalization constant for the compound score.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Weight of sentiment before "but".
const BEFORE_BUT_WEIGHT: f64 = 0.5;

/// Weight of sentiment after "but".
const AFTER_BUT_WEIGHT: f64 = 1.5;

/// Lexicon-based sentiment analyzer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Polarity distribution of `text`.
    ///
    /// Text with no tokens scores zero everywhere.
    pub fn polarity_scores(&self, text: &str) -> Sentiment {
        let tokens = tokenize(text);
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let cap_differential = has_cap_differential(&tokens);

        let mut valences = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let word = lowered[i].as_str();
            if BOOSTERS.contains_key(word) {
                valences.push(0.0);
                continue;
            }
            if word == "kind" && lowered.get(i + 1).map(String::as_str) == Some("of") {
                valences.push(0.0);
                continue;
            }
            valences.push(word_valence(&tokens, &lowered, i, cap_differential));
        }

        apply_but_contrast(&lowered, &mut valences);
        score_valences(&valences, text)
    }
}

/// Split on whitespace, stripping surrounding punctuation from words
/// longer than two characters so emoticons survive.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token.to_string()
            } else {
                stripped.to_string()
            }
        })
        .collect()
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic)
        && !token.chars().any(char::is_lowercase)
}

/// True when some, but not all, tokens are shouting.
fn has_cap_differential(tokens: &[String]) -> bool {
    let shouting = tokens.iter().filter(|t| is_all_caps(t)).count();
    shouting > 0 && shouting < tokens.len()
}

fn is_negated(word: &str) -> bool {
    NEGATIONS.contains(word) || word.contains("n't")
}

fn in_lexicon(word: &str) -> bool {
    LEXICON.contains_key(word)
}

/// Booster contribution of `token` to a word of the given valence.
fn booster_scalar(token: &str, lowered: &str, valence: f64, cap_differential: bool) -> f64 {
    let Some(&base) = BOOSTERS.get(lowered) else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -base } else { base };
    if cap_differential && is_all_caps(token) {
        if valence > 0.0 {
            scalar += CAPS_INCREMENT;
        } else {
            scalar -= CAPS_INCREMENT;
        }
    }
    scalar
}

fn word_valence(tokens: &[String], lowered: &[String], i: usize, cap_differential: bool) -> f64 {
    let word = lowered[i].as_str();
    let Some(&base) = LEXICON.get(word) else {
        return 0.0;
    };
    let mut valence = base;

    // "no" directly before another sentiment word acts as a negation only.
    if word == "no" && lowered.get(i + 1).is_some_and(|next| in_lexicon(next)) {
        valence = 0.0;
    }
    if (i > 0 && lowered[i - 1] == "no")
        || (i > 1 && lowered[i - 2] == "no")
        || (i > 2 && lowered[i - 3] == "no" && matches!(lowered[i - 1].as_str(), "or" | "nor"))
    {
        valence = base * NEGATION_SCALAR;
    }

    if cap_differential && is_all_caps(&tokens[i]) {
        if valence > 0.0 {
            valence += CAPS_INCREMENT;
        } else {
            valence -= CAPS_INCREMENT;
        }
    }

    for distance in 0..3 {
        if i <= distance {
            break;
        }
        let j = i - (distance + 1);
        if in_lexicon(&lowered[j]) {
            continue;
        }
        let mut scalar = booster_scalar(&tokens[j], &lowered[j], valence, cap_differential);
        if distance == 1 {
            scalar *= 0.95;
        } else if distance == 2 {
            scalar *= 0.9;
        }
        valence += scalar;
        valence = negation_check(valence, lowered, distance, i);
    }

    least_check(valence, lowered, i)
}

fn negation_check(valence: f64, lowered: &[String], distance: usize, i: usize) -> f64 {
    let at = |back: usize| lowered[i - back].as_str();
    match distance {
        0 => {
            if is_negated(at(1)) {
                return valence * NEGATION_SCALAR;
            }
        }
        1 => {
            if at(2) == "never" && matches!(at(1), "so" | "this") {
                return valence * 1.25;
            }
            if at(2) == "without" && at(1) == "doubt" {
                return valence;
            }
            if is_negated(at(2)) {
                return valence * NEGATION_SCALAR;
            }
        }
        _ => {
            if at(3) == "never"
                && (matches!(at(2), "so" | "this") || matches!(at(1), "so" | "this"))
            {
                return valence * 1.25;
            }
            if at(3) == "without" && (at(2) == "doubt" || at(1) == "doubt") {
                return valence;
            }
            if is_negated(at(3)) {
                return valence * NEGATION_SCALAR;
            }
        }
    }
    valence
}

/// "least" flips polarity unless it reads "at least" or "very least".
fn least_check(valence: f64, lowered: &[String], i: usize) -> f64 {
    if i > 1 && lowered[i - 1] == "least" && !in_lexicon("least") {
        if lowered[i - 2] != "at" && lowered[i - 2] != "very" {
            return valence * NEGATION_SCALAR;
        }
    } else if i > 0 && lowered[i - 1] == "least" && !in_lexicon("least") {
        return valence * NEGATION_SCALAR;
    }
    valence
}

/// Words after the first "but" dominate those before it.
fn apply_but_contrast(lowered: &[String], valences: &mut [f64]) {
    let Some(but_index) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, valence) in valences.iter_mut().enumerate() {
        if i < but_index {
            *valence *= BEFORE_BUT_WEIGHT;
        } else if i > but_index {
            *valence *= AFTER_BUT_WEIGHT;
        }
    }
}

/// Extra emphasis contributed by exclamation and question marks.
fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + question_emphasis
}

fn normalize(score: f64) -> f64 {
    let normalized = score / (score * score + NORMALIZATION_ALPHA).sqrt();
    normalized.clamp(-1.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn score_valences(valences: &[f64], text: &str) -> Sentiment {
    if valences.is_empty() {
        return Sentiment::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut total: f64 = valences.iter().sum();
    if total > 0.0 {
        total += emphasis;
    } else if total < 0.0 {
        total -= emphasis;
    }
    let compound = normalize(total);

    let mut positive = 0.0;
    let mut negative = 0.0;
    let mut neutral = 0.0;
    for &v in valences {
        if v > 0.0 {
            positive += v + 1.0;
        } else if v < 0.0 {
            negative += v - 1.0;
        } else {
            neutral += 1.0;
        }
    }

    if positive > f64::abs(negative) {
        positive += emphasis;
    } else if positive < f64::abs(negative) {
        negative -= emphasis;
    }

    let denominator = positive + negative.abs() + neutral;
    Sentiment {
        neg: round_to((negative / denominator).abs(), 3),
        neu: round_to((neutral / denominator).abs(), 3),
        pos: round_to((positive / denominator).abs(), 3),
        compound: round_to(compound, 4),
    }
}
