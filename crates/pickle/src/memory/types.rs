//! Memory types for the Pickle system
//!
//! Defines the stored `Memory` record and the canonical `MemoryRecord`
//! shape consumed by the local answer engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest importance a user can assign
pub const MIN_IMPORTANCE: u8 = 1;
/// Highest importance a user can assign
pub const MAX_IMPORTANCE: u8 = 5;
/// Importance used when none is given
pub const DEFAULT_IMPORTANCE: u8 = 3;

/// Clamp a user-supplied importance into the 1..=5 range
pub fn clamp_importance(importance: i64) -> u8 {
    importance.clamp(MIN_IMPORTANCE as i64, MAX_IMPORTANCE as i64) as u8
}

/// A single note saved by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Unique identifier for this memory
    pub id: Uuid,
    /// Owner of this memory
    pub user_id: String,
    /// The note itself, trimmed and never empty
    pub text: String,
    /// User-assigned importance, 1 (low) to 5 (high)
    #[serde(default = "default_importance")]
    pub importance: u8,
    /// When this memory was saved
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Create a new memory stamped with the current time
    pub fn new(user_id: impl Into<String>, text: impl Into<String>, importance: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            text: text.into(),
            importance: clamp_importance(importance as i64),
            created_at: Utc::now(),
        }
    }

    /// Timestamp formatted the way it is shown to users and to the remote model
    pub fn saved_at(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// The record shape the local answer engine works on.
///
/// Storage layers normalize into this before calling the engine. Records
/// with blank text are skipped during scoring rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecord {
    #[serde(default, alias = "memory_text")]
    pub text: String,
    #[serde(default = "default_importance")]
    pub importance: u8,
}

impl MemoryRecord {
    pub fn new(text: impl Into<String>, importance: u8) -> Self {
        Self {
            text: text.into(),
            importance,
        }
    }
}

impl From<&Memory> for MemoryRecord {
    fn from(memory: &Memory) -> Self {
        Self {
            text: memory.text.clone(),
            importance: memory.importance,
        }
    }
}

fn default_importance() -> u8 {
    DEFAULT_IMPORTANCE
}
