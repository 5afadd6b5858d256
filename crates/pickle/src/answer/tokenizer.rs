//! Word tokenization for lexical matching
//!
//! Lowercases text, pulls out runs of letters, digits and apostrophes, and
//! drops words that carry no signal for matching a question to a memory.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9']+").expect("word pattern is valid"));

/// Words ignored when comparing questions and memories
pub const STOPWORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // prepositions and conjunctions
    "at", "in", "on", "to", "for", "of", "with", "by", "from", "about", "into", "and", "or",
    "but", "so", "nor",
    // first person
    "i", "my", "me",
    // days
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "today",
    "tonight",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Check whether a lowercase word is ignored for matching
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Split text into its set of significant lowercase words.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !is_stopword(word))
        .map(str::to_string)
        .collect()
}
