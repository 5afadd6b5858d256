//! Question answering with a remote model and local fallback
//!
//! A remote LLM answers when a credential is configured; otherwise, or when
//! the call fails, the local answer engine answers from the same memories.

pub mod hybrid;
pub mod prompts;
pub mod provider;
pub mod remote;
pub mod types;

pub use hybrid::HybridAnswerer;
pub use provider::AnswerProvider;
pub use remote::RemoteAnswerer;
pub use types::{Answer, AnswerSource, FallbackReason, OracleError};
