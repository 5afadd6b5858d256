//! Test utilities for pickle - shared mocks and fixtures
//!
//! - A scripted answer provider so fallback paths run without a network
//! - Builders for memory records

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::memory::types::{Memory, MemoryRecord};
use crate::oracle::{AnswerProvider, OracleError};

/// Answer provider returning a fixed reply or a fixed failure.
#[derive(Debug, Default)]
pub struct MockAnswerer {
    reply: Option<String>,
    available: bool,
    calls: AtomicUsize,
}

impl MockAnswerer {
    /// Provider that always answers with `reply`
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            available: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Provider whose every call fails
    pub fn failing() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// Provider that reports itself unavailable
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Number of times `answer` was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerProvider for MockAnswerer {
    async fn answer(&self, _question: &str, _memories: &[Memory]) -> Result<String, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| OracleError::ApiError("Mock failure".into()))
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Records from `(text, importance)` pairs, in order
pub fn records(items: &[(&str, u8)]) -> Vec<MemoryRecord> {
    items
        .iter()
        .map(|(text, importance)| MemoryRecord::new(*text, *importance))
        .collect()
}
