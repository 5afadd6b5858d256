//! Answer provider trait
//!
//! Abstracts backends that answer a question from a user's memories
//! using an external model.

use async_trait::async_trait;

use crate::memory::types::Memory;
use crate::oracle::types::OracleError;

/// Trait for remote answer backends
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Answer `question` using only `memories` as evidence
    async fn answer(&self, question: &str, memories: &[Memory]) -> Result<String, OracleError>;

    /// Check if the provider can take requests (credential present, endpoint set)
    async fn is_available(&self) -> bool;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
