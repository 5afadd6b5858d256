//! Local question answering over saved memories
//!
//! Answers a question without any network call: the question and every
//! memory are tokenized, memories sharing words with the question are ranked,
//! and the best match (or a short list for aggregate questions) is rewritten
//! into second person and wrapped in a friendly template.
//!
//! The engine never fails. When nothing can be matched it returns one of the
//! sentinel replies [`NO_MEMORIES`] or [`UNKNOWN`], which callers compare
//! against to choose their own messaging.

pub mod compose;
pub mod intent;
pub mod ranker;
pub mod tokenizer;

use rand::Rng;
use tracing::debug;

use crate::config::AnswerConfig;
use crate::memory::types::MemoryRecord;

pub use compose::{TEMPLATES, domain_suffix, possible_replies, to_second_person};
pub use intent::wants_multiple;
pub use ranker::{ScoredCandidate, rank};
pub use tokenizer::tokenize;

/// Reply when the user has not saved anything yet
pub const NO_MEMORIES: &str = "I don't have any memories yet.";

/// Reply when no memory matches the question
pub const UNKNOWN: &str = "I don't know.";

/// Default cap on items listed for aggregate questions
pub const DEFAULT_MAX_LIST_ITEMS: usize = 5;

/// Stateless local answer engine.
#[derive(Debug, Clone, Copy)]
pub struct LocalAnswerEngine {
    max_list_items: usize,
}

impl Default for LocalAnswerEngine {
    fn default() -> Self {
        Self {
            max_list_items: DEFAULT_MAX_LIST_ITEMS,
        }
    }
}

impl LocalAnswerEngine {
    pub fn new(config: &AnswerConfig) -> Self {
        Self {
            max_list_items: config.max_list_items,
        }
    }

    /// Answer using the thread-local random generator for template choice
    pub fn answer(&self, question: &str, memories: &[MemoryRecord]) -> String {
        self.answer_with_rng(question, memories, &mut rand::thread_rng())
    }

    /// Answer with an injected random source.
    ///
    /// Identical inputs and an identically seeded `rng` give identical output.
    pub fn answer_with_rng<R: Rng + ?Sized>(
        &self,
        question: &str,
        memories: &[MemoryRecord],
        rng: &mut R,
    ) -> String {
        if memories.is_empty() {
            return NO_MEMORIES.to_string();
        }

        let question_tokens = tokenize(question);
        if question_tokens.is_empty() {
            debug!("Question has no significant words");
            return UNKNOWN.to_string();
        }

        let ranked = ranker::rank_tokens(&question_tokens, memories);
        debug!(
            "Ranked {} of {} memories for question ({} tokens)",
            ranked.len(),
            memories.len(),
            question_tokens.len()
        );

        compose::compose(question, &ranked, self.max_list_items, rng)
    }
}

/// Answer a question from memories with the default engine settings.
pub fn answer_from_memories(question: &str, memories: &[MemoryRecord]) -> String {
    LocalAnswerEngine::default().answer(question, memories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_no_memories_message() {
        assert_eq!(answer_from_memories("Who are Arsenal playing?", &[]), NO_MEMORIES);
        assert_eq!(answer_from_memories("", &[]), NO_MEMORIES);
    }

    #[test]
    fn test_stopword_question_is_unknown() {
        let memories = vec![MemoryRecord::new("the a an", 5)];
        assert_eq!(answer_from_memories("the a an", &memories), UNKNOWN);
    }

    #[test]
    fn test_no_overlap_is_unknown() {
        let memories = vec![MemoryRecord::new("Bins go out Wednesday", 3)];
        assert_eq!(answer_from_memories("Who are Arsenal playing?", &memories), UNKNOWN);
    }

    #[test]
    fn test_configured_list_cap() {
        let engine = LocalAnswerEngine::new(&AnswerConfig { max_list_items: 2 });
        let memories: Vec<_> = (1..=4)
            .map(|i| MemoryRecord::new(format!("Finish tasks batch {i}"), 3))
            .collect();
        let mut rng = StdRng::seed_from_u64(0);

        let reply = engine.answer_with_rng("What tasks are there?", &memories, &mut rng);

        assert_eq!(reply.matches(compose::BULLET).count(), 2);
    }
}
