//! Pickle - personal memories with question answering
//!
//! Users save short notes with an importance rating, search them, and ask
//! questions about them. Questions go to a remote LLM when one is configured
//! and otherwise to a local, network-free answer engine.

pub mod answer;
pub mod config;
pub mod error;
pub mod memory;
pub mod oracle;
pub mod server;
pub mod storage;
pub mod testing;

pub use answer::{LocalAnswerEngine, NO_MEMORIES, UNKNOWN, answer_from_memories};
pub use error::PickleError;
