//! Single vs multi-item question detection

/// Phrases that ask for an aggregate view rather than one memory
pub const MULTI_ITEM_PHRASES: &[&str] = &[
    // temporal scope
    "today",
    "tonight",
    "this evening",
    "this afternoon",
    "this morning",
    // task aggregation
    "to do",
    "todo",
    "tasks",
    "things",
    "everything",
    "all the things",
    // aggregate questions
    "what are all",
    "what do i have",
    "what should i do",
];

/// Whether the question asks for a list of memories.
///
/// Plain substring containment on the lowercased question; spacing and word
/// order must match a phrase exactly.
pub fn wants_multiple(question: &str) -> bool {
    let q = question.to_lowercase();
    MULTI_ITEM_PHRASES.iter().any(|phrase| q.contains(phrase))
}
