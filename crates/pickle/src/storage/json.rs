//! JSON file storage for memories
//!
//! Keeps every user's memories in a single `memories.json` in the data
//! directory.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{PickleError, Result};
use crate::memory::types::Memory;
use crate::storage::filter::MemoryFilter;

const MEMORIES_FILE: &str = "memories.json";

/// File-backed memory store.
///
/// All users' memories live in one pretty-printed JSON array. The whole set
/// is held in memory and rewritten on every change via a temp file and an
/// atomic rename.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    memories: Vec<Memory>,
}

impl JsonStore {
    /// Open the store in `dir`, creating the directory if needed.
    pub async fn open(dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            PickleError::Storage(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let path = dir.join(MEMORIES_FILE);
        let memories = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                PickleError::Storage(format!("Failed to parse {}: {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No memories file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => {
                return Err(PickleError::Storage(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        tracing::debug!("Loaded {} memories from {}", memories.len(), path.display());
        Ok(Self { path, memories })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save a new memory for `user_id`.
    ///
    /// Text is trimmed and must not be blank; importance is clamped to 1..=5.
    pub async fn insert(&mut self, user_id: &str, text: &str, importance: u8) -> Result<Memory> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PickleError::Memory("Memory text cannot be empty".to_string()));
        }

        let memory = Memory::new(user_id, text, importance);
        self.memories.push(memory.clone());

        if let Err(e) = self.persist().await {
            self.memories.pop();
            return Err(e);
        }

        tracing::info!("Saved memory {} for user {}", memory.id, user_id);
        Ok(memory)
    }

    /// Memories matching the filter, newest first
    pub fn list(&self, filter: &MemoryFilter) -> Vec<Memory> {
        let mut memories: Vec<Memory> = self
            .memories
            .iter()
            .rev()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();

        memories.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = filter.limit {
            memories.truncate(limit);
        }
        memories
    }

    pub fn get(&self, id: Uuid) -> Option<&Memory> {
        self.memories.iter().find(|m| m.id == id)
    }

    /// Delete one of `user_id`'s memories. Returns false when not found.
    pub async fn delete(&mut self, user_id: &str, id: Uuid) -> Result<bool> {
        let Some(index) = self
            .memories
            .iter()
            .position(|m| m.id == id && m.user_id == user_id)
        else {
            return Ok(false);
        };

        let removed = self.memories.remove(index);
        if let Err(e) = self.persist().await {
            self.memories.insert(index, removed);
            return Err(e);
        }

        tracing::info!("Deleted memory {} for user {}", id, user_id);
        Ok(true)
    }

    /// Number of memories saved by `user_id`
    pub fn count(&self, user_id: &str) -> usize {
        self.memories.iter().filter(|m| m.user_id == user_id).count()
    }

    async fn persist(&self) -> Result<()> {
        let json = serde_json::to_vec_pretty(&self.memories)?;
        let tmp = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp, json).await.map_err(|e| {
            PickleError::Storage(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            PickleError::Storage(format!("Failed to replace {}: {e}", self.path.display()))
        })?;
        Ok(())
    }
}
