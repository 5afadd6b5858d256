//! Integration tests for storage layer
//!
//! Tests the JsonStore implementation against a real file in a temp directory.

use pickle_server::PickleError;
use pickle_server::storage::{JsonStore, MemoryFilter};
use tempfile::tempdir;
use uuid::Uuid;

/// Test fixture: Create a test store in a temporary directory
async fn create_test_store() -> (JsonStore, tempfile::TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = JsonStore::open(temp_dir.path())
        .await
        .expect("Failed to open store");
    (store, temp_dir)
}

#[tokio::test]
async fn test_open_creates_missing_directory() {
    let temp_dir = tempdir().unwrap();
    let nested = temp_dir.path().join("nested").join("pickle");

    let store = JsonStore::open(&nested).await.unwrap();

    assert!(nested.is_dir());
    assert_eq!(store.count("alice"), 0);
}

#[tokio::test]
async fn test_insert_and_get() {
    let (mut store, _temp_dir) = create_test_store().await;

    let memory = store
        .insert("alice", "  Dentist on Thursday at 3pm  ", 4)
        .await
        .unwrap();

    assert_eq!(memory.text, "Dentist on Thursday at 3pm");
    assert_eq!(memory.importance, 4);
    assert_eq!(memory.user_id, "alice");

    let fetched = store.get(memory.id).expect("memory should exist");
    assert_eq!(fetched, &memory);
}

#[tokio::test]
async fn test_insert_clamps_importance() {
    let (mut store, _temp_dir) = create_test_store().await;

    let low = store.insert("alice", "low", 0).await.unwrap();
    let high = store.insert("alice", "high", 9).await.unwrap();

    assert_eq!(low.importance, 1);
    assert_eq!(high.importance, 5);
}

#[tokio::test]
async fn test_insert_rejects_blank_text() {
    let (mut store, _temp_dir) = create_test_store().await;

    let err = store.insert("alice", "   \n", 3).await.unwrap_err();

    assert!(matches!(err, PickleError::Memory(_)));
    assert_eq!(store.count("alice"), 0);
}

#[tokio::test]
async fn test_list_newest_first() {
    let (mut store, _temp_dir) = create_test_store().await;

    let first = store.insert("alice", "first", 3).await.unwrap();
    let second = store.insert("alice", "second", 3).await.unwrap();
    let third = store.insert("alice", "third", 3).await.unwrap();

    let listed = store.list(&MemoryFilter::for_user("alice"));
    let ids: Vec<Uuid> = listed.iter().map(|m| m.id).collect();

    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_list_search_is_case_insensitive() {
    let (mut store, _temp_dir) = create_test_store().await;

    store
        .insert("alice", "Arsenal vs Man City on Sunday", 5)
        .await
        .unwrap();
    store.insert("alice", "Buy milk", 2).await.unwrap();

    let filter = MemoryFilter::for_user("alice").with_search("ARSENAL");
    let listed = store.list(&filter);

    assert_eq!(listed.len(), 1);
    assert!(listed[0].text.starts_with("Arsenal"));
}

#[tokio::test]
async fn test_list_limit() {
    let (mut store, _temp_dir) = create_test_store().await;

    for i in 0..5 {
        store.insert("alice", &format!("note {i}"), 3).await.unwrap();
    }

    let listed = store.list(&MemoryFilter::for_user("alice").with_limit(2));
    assert_eq!(listed.len(), 2);
    assert_eq!(store.count("alice"), 5);
}

#[tokio::test]
async fn test_users_are_isolated() {
    let (mut store, _temp_dir) = create_test_store().await;

    let alice = store.insert("alice", "Alice's note", 3).await.unwrap();
    store.insert("bob", "Bob's note", 3).await.unwrap();

    let listed = store.list(&MemoryFilter::for_user("alice"));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, alice.id);

    // bob cannot delete alice's memory
    assert!(!store.delete("bob", alice.id).await.unwrap());
    assert_eq!(store.count("alice"), 1);
}

#[tokio::test]
async fn test_delete() {
    let (mut store, _temp_dir) = create_test_store().await;

    let memory = store.insert("alice", "to be deleted", 3).await.unwrap();

    assert!(store.delete("alice", memory.id).await.unwrap());
    assert!(store.get(memory.id).is_none());
    assert!(!store.delete("alice", memory.id).await.unwrap());
}

#[tokio::test]
async fn test_reopen_persists_memories() {
    let temp_dir = tempdir().unwrap();

    let (kept, deleted) = {
        let mut store = JsonStore::open(temp_dir.path()).await.unwrap();
        let kept = store.insert("alice", "Physio Tuesday 9am", 3).await.unwrap();
        let deleted = store.insert("alice", "Old note", 1).await.unwrap();
        store.delete("alice", deleted.id).await.unwrap();
        (kept, deleted)
    };

    let reopened = JsonStore::open(temp_dir.path()).await.unwrap();

    assert_eq!(reopened.get(kept.id), Some(&kept));
    assert!(reopened.get(deleted.id).is_none());
    assert!(reopened.path().ends_with("memories.json"));
}

#[tokio::test]
async fn test_open_empty_file_is_empty_store() {
    let temp_dir = tempdir().unwrap();
    std::fs::write(temp_dir.path().join("memories.json"), "\n").unwrap();

    let store = JsonStore::open(temp_dir.path()).await.unwrap();
    assert_eq!(store.count("alice"), 0);
}

#[tokio::test]
async fn test_open_corrupt_file_errors() {
    let temp_dir = tempdir().unwrap();
    std::fs::write(temp_dir.path().join("memories.json"), "{not json").unwrap();

    let err = JsonStore::open(temp_dir.path()).await.unwrap_err();
    assert!(matches!(err, PickleError::Storage(_)));
}
