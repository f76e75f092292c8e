//! Sentiment lexicon and modifier tables.
//!
//! Valences range from -4 (most negative) to +4 (most positive) and follow
//! the human-rated VADER lexicon.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Lexicon in the VADER distribution format: one token per line, then its
/// mean valence, tab separated. Extra columns (rating spread, raw ratings)
/// are ignored.
const VADER_LEXICON: &str = include_str!("../resources/vader_lexicon.txt");

/// Word valences.
pub static LEXICON: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| parse_lexicon(VADER_LEXICON));

fn parse_lexicon(source: &str) -> HashMap<&str, f64> {
    let mut lexicon = HashMap::new();
    for line in source.lines() {
        let mut columns = line.split('\t');
        let (Some(token), Some(valence)) = (columns.next(), columns.next()) else {
            continue;
        };
        match valence.trim().parse::<f64>() {
            Ok(valence) if !token.is_empty() => {
                lexicon.insert(token, valence);
            }
            _ => log::warn!("Skipping malformed lexicon line: {:?}", line),
        }
    }
    lexicon
}

/// Negation words.
pub static NEGATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
        "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt",
        "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't",
        "hasn't", "haven't", "isn't", "mightn't", "mustn't", "neednt", "needn't", "never",
        "none", "nope", "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt",
        "uhuh", "wasnt", "werent", "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't",
        "weren't", "without", "wont", "wouldnt", "won't", "wouldn't", "rarely", "seldom",
        "despite",
    ]
    .into_iter()
    .collect()
});

/// Empirical increment added by a booster word.
pub const BOOSTER_INCREMENT: f64 = 0.293;

/// Empirical decrement added by a dampener word.
pub const BOOSTER_DECREMENT: f64 = -0.293;

/// Intensity modifiers and their signed scalar.
pub static BOOSTERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let increments = [
        "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
        "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
        "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping",
        "flippin", "fricking", "frickin", "frigging", "friggin", "fully", "fucking",
        "fuckin", "greatly", "hella", "highly", "hugely", "incredible", "incredibly",
        "intensely", "major", "majorly", "more", "most", "particularly", "purely", "quite",
        "really", "remarkably", "so", "substantially", "thoroughly", "total", "totally",
        "tremendous", "tremendously", "uber", "unbelievably", "unusually", "utter", "utterly",
        "very",
    ];
    let decrements = [
        "almost", "barely", "hardly", "just enough", "kind of", "kinda", "kindof",
        "kind-of", "less", "little", "marginal", "marginally", "occasional", "occasionally",
        "partly", "scarce", "scarcely", "slight", "slightly", "somewhat", "sort of", "sorta",
        "sortof", "sort-of",
    ];
    increments
        .into_iter()
        .map(|w| (w, BOOSTER_INCREMENT))
        .chain(decrements.into_iter().map(|w| (w, BOOSTER_DECREMENT)))
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_lexicon_loads() {
        assert!(LEXICON.len() > 700);
        assert_eq!(LEXICON.get("good"), Some(&1.9));
        assert_eq!(LEXICON.get("handsome"), Some(&2.2));
        assert_eq!(LEXICON.get(":)"), Some(&2.0));
        assert!(LEXICON.values().all(|v| (-4.0..=4.0).contains(v)));
    }

    #[test]
    fn test_parse_upstream_line_format() {
        let source = "hopeful\t1.9\t0.53852\t[2, 2, 1, 2, 2]\n\nbroken line\nsad\t-2.1\n";
        let lexicon = parse_lexicon(source);
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.get("hopeful"), Some(&1.9));
        assert_eq!(lexicon.get("sad"), Some(&-2.1));
    }
}
