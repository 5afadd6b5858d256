//! Memory types
//!
//! Defines the stored memory record and the canonical shape handed to the
//! local answer engine.

pub mod types;

pub use types::{
    DEFAULT_IMPORTANCE, MAX_IMPORTANCE, MIN_IMPORTANCE, Memory, MemoryRecord, clamp_importance,
};
