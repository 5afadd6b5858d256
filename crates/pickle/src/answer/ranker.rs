//! Lexical relevance scoring and ranking
//!
//! A memory is evidence for a question only if the two share at least one
//! significant word. Shared words dominate the score; importance only breaks
//! ties between memories with the same overlap.

use std::collections::HashSet;

use crate::answer::tokenizer::tokenize;
use crate::memory::types::{MemoryRecord, clamp_importance};

/// Points per shared word. Must exceed the importance range so that one
/// extra shared word always outranks any importance difference.
pub const OVERLAP_WEIGHT: u32 = 10;

/// A memory's text paired with its score for one question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCandidate<'a> {
    pub score: u32,
    pub text: &'a str,
}

/// Score one record against pre-tokenized question words.
///
/// Returns `None` for blank records and records sharing no word with the
/// question.
pub fn score(question_tokens: &HashSet<String>, record: &MemoryRecord) -> Option<u32> {
    if record.text.trim().is_empty() {
        return None;
    }

    let overlap = tokenize(&record.text)
        .iter()
        .filter(|token| question_tokens.contains(*token))
        .count() as u32;

    if overlap == 0 {
        return None;
    }

    let importance = clamp_importance(record.importance as i64) as u32;
    Some(overlap * OVERLAP_WEIGHT + importance)
}

/// Rank records by relevance to pre-tokenized question words.
///
/// Highest score first; equal scores keep their input order.
pub fn rank_tokens<'a>(
    question_tokens: &HashSet<String>,
    records: &'a [MemoryRecord],
) -> Vec<ScoredCandidate<'a>> {
    if question_tokens.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<ScoredCandidate<'a>> = records
        .iter()
        .filter_map(|record| {
            score(question_tokens, record).map(|score| ScoredCandidate {
                score,
                text: record.text.as_str(),
            })
        })
        .collect();

    // stable: ties keep input order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Rank records by relevance to a question.
pub fn rank<'a>(question: &str, records: &'a [MemoryRecord]) -> Vec<ScoredCandidate<'a>> {
    rank_tokens(&tokenize(question), records)
}
