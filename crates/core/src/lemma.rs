//! Rule-based noun lemmatization.
//!
//! Reduces plural nouns to their dictionary form using WordNet-style
//! suffix rules plus a table of irregular forms. Words are treated as
//! nouns; verbs and adjectives pass through except where a noun rule
//! happens to apply.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Irregular plurals and words the suffix rules would mangle.
static EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("analyses", "analysis"),
        ("hypotheses", "hypothesis"),
        ("theses", "thesis"),
        ("crises", "crisis"),
        ("bases", "basis"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("appendices", "appendix"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("leaves", "leaf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("selves", "self"),
        ("wolves", "wolf"),
        ("thieves", "thief"),
        ("series", "series"),
        ("species", "species"),
        ("news", "news"),
        ("data", "data"),
        ("media", "media"),
        ("physics", "physics"),
        ("economics", "economics"),
        ("analytics", "analytics"),
        ("metrics", "metric"),
        ("logistics", "logistics"),
        ("sales", "sale"),
    ]
    .into_iter()
    .collect()
});

/// Endings that look plural but belong to singular nouns.
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "ous", "ics"];

/// Minimum length of a word the suffix rules may touch.
const MIN_RULE_LENGTH: usize = 4;

/// Reduce a lowercase token to its noun lemma.
pub fn lemmatize(word: &str) -> String {
    if let Some(lemma) = EXCEPTIONS.get(word) {
        return (*lemma).to_string();
    }

    if word.chars().count() < MIN_RULE_LENGTH || !word.ends_with('s') {
        return word.to_string();
    }

    if SINGULAR_ENDINGS.iter().any(|e| word.ends_with(e)) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{}y", stem);
        }
    }

    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    word[..word.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemmatize("investors"), "investor");
        assert_eq!(lemmatize("founders"), "founder");
        assert_eq!(lemmatize("cases"), "case");
        assert_eq!(lemmatize("users"), "user");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(lemmatize("companies"), "company");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("churches"), "church");
        assert_eq!(lemmatize("wishes"), "wish");
        assert_eq!(lemmatize("classes"), "class");
    }

    #[test]
    fn test_singular_endings_untouched() {
        assert_eq!(lemmatize("business"), "business");
        assert_eq!(lemmatize("status"), "status");
        assert_eq!(lemmatize("analysis"), "analysis");
        assert_eq!(lemmatize("famous"), "famous");
    }

    #[test]
    fn test_irregular_forms() {
        assert_eq!(lemmatize("women"), "woman");
        assert_eq!(lemmatize("criteria"), "criterion");
        assert_eq!(lemmatize("metrics"), "metric");
        assert_eq!(lemmatize("series"), "series");
    }

    #[test]
    fn test_short_and_non_plural_words() {
        assert_eq!(lemmatize("gas"), "gas");
        assert_eq!(lemmatize("market"), "market");
        assert_eq!(lemmatize(""), "");
    }
}
