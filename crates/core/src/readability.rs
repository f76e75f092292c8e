//! Flesch reading-ease scoring.

use regex::Regex;
use std::sync::LazyLock;

/// Sentence-like fragments: a run of non-terminators plus its terminators.
static SENTENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[^.!?]+[.!?]*").unwrap());

/// Fragments with this many words or fewer are not counted as sentences.
const MIN_SENTENCE_WORDS: usize = 2;

/// Inputs shorter than this (ignoring whitespace) are not scored.
const MIN_SCORABLE_CHARS: usize = 2;

/// Flesch reading ease of `text`; higher is easier.
///
/// Returns None for degenerate input: fewer than two non-whitespace
/// characters, or no words at all.
pub fn readability(text: &str) -> Option<f64> {
    if text.chars().filter(|c| !c.is_whitespace()).count() < MIN_SCORABLE_CHARS {
        return None;
    }

    let words = words(text);
    if words.is_empty() {
        return None;
    }

    let word_count = words.len() as f64;
    let sentences = sentence_count(text) as f64;
    let syllables: usize = words.iter().map(|w| syllable_count(w)).sum();

    let score = 206.835
        - 1.015 * (word_count / sentences)
        - 84.6 * (syllables as f64 / word_count);

    if score.is_finite() {
        Some((score * 100.0).round() / 100.0)
    } else {
        None
    }
}

/// Words with punctuation removed; tokens that were only punctuation are
/// dropped.
fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Number of sentences, ignoring fragments of two words or fewer.
/// Never less than one.
fn sentence_count(text: &str) -> usize {
    let fragments: Vec<&str> = SENTENCE_REGEX.find_iter(text).map(|m| m.as_str()).collect();
    let ignored = fragments
        .iter()
        .filter(|f| words(f).len() <= MIN_SENTENCE_WORDS)
        .count();
    fragments.len().saturating_sub(ignored).max(1)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimate syllables by counting vowel groups, with the usual silent-e
/// and consonant-le adjustments. At least one per word.
fn syllable_count(word: &str) -> usize {
    let word: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if word.is_empty() {
        return 1;
    }

    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &word {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    let n = word.len();
    if n > 2 && word[n - 1] == 'e' && !is_vowel(word[n - 2]) {
        let le_ending = word[n - 2] == 'l' && !is_vowel(word[n - 3]);
        if !le_ending && count > 1 {
            count -= 1;
        }
    }

    count.max(1)
}
