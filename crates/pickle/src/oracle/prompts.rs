//! Prompts for remote question answering

use crate::memory::types::Memory;

/// System prompt for the remote model
pub const SYSTEM_PROMPT: &str = r#"You are Pickle, a helpful assistant that recalls a person's saved memories the way a friend would.
Use natural, conversational language and always include the subject so each sentence stands on its own.

Examples:
- Asked "Who are Arsenal playing?", reply: "Arsenal are playing Manchester City."
- Asked "Where are Arsenal playing?", reply: "Arsenal are playing at the Emirates in London."

Answer ONLY from the memories provided. If the answer is not in the memories, say "I don't know."
Be clear and helpful."#;

/// User message template
///
/// Placeholders: {evidence} - formatted memory lines, {question} - the user's question
pub const QUESTION_PROMPT: &str = r#"Memories:
{evidence}

Question: {question}
Answer in complete sentences."#;

/// Evidence text used when the user has no memories
pub const NO_EVIDENCE: &str = "(no memories yet)";

/// One line per memory: `- (2025-03-09 16:30, importance 5): text`
pub fn format_evidence(memories: &[Memory]) -> String {
    if memories.is_empty() {
        return NO_EVIDENCE.to_string();
    }

    memories
        .iter()
        .map(|m| format!("- ({}, importance {}): {}", m.saved_at(), m.importance, m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the user message for a question
pub fn question_prompt(question: &str, memories: &[Memory]) -> String {
    QUESTION_PROMPT
        .replace("{evidence}", &format_evidence(memories))
        .replace("{question}", question)
}
