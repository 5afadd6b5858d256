//! Filter types for listing memories
//!
//! Narrows a listing to one user's memories, optionally to those whose text
//! contains a search term, and optionally caps the number returned.

use crate::memory::types::Memory;

/// Filter criteria for memory listings.
///
/// `user_id` is always applied. The other fields are optional; when `None`
/// that filter is not applied.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilter {
    /// Owner whose memories are listed
    pub user_id: String,
    /// Case-insensitive substring the text must contain
    pub search: Option<String>,
    /// Maximum memories to return (newest first)
    pub limit: Option<usize>,
}

impl MemoryFilter {
    /// Filter to all memories of one user
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Only memories whose text contains `term`. A blank term is ignored.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        };
        self
    }

    /// Cap the number of memories returned
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a search term is set
    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    /// Check a memory against owner and search term (limit is applied by the store)
    pub fn matches(&self, memory: &Memory) -> bool {
        if memory.user_id != self.user_id {
            return false;
        }

        match &self.search {
            Some(term) => memory.text.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }
}
