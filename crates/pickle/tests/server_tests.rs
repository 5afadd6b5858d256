//! Integration tests for the HTTP API
//!
//! Drives the real router with in-process requests: health, saving, listing,
//! searching and deleting memories, asking questions, and the JSON error body.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;
use tower::ServiceExt;

use pickle_server::answer::{LocalAnswerEngine, NO_MEMORIES};
use pickle_server::oracle::HybridAnswerer;
use pickle_server::server::{AppState, create_router};
use pickle_server::storage::JsonStore;
use pickle_server::testing::MockAnswerer;

// =============================================================================
// Test Fixtures
// =============================================================================

async fn create_test_app(answerer: HybridAnswerer) -> (Router, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let store = JsonStore::open(temp_dir.path())
        .await
        .expect("Failed to open store");

    let state = Arc::new(AppState {
        store: Arc::new(TokioMutex::new(store)),
        answerer: Arc::new(answerer),
    });

    (create_router(state), temp_dir)
}

async fn local_app() -> (Router, tempfile::TempDir) {
    create_test_app(HybridAnswerer::local_only(LocalAnswerEngine::default())).await
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn save(app: &Router, user: &str, text: &str, importance: i64) -> serde_json::Value {
    let (status, json) = send(
        app,
        json_request(
            "POST",
            &format!("/users/{user}/memories"),
            serde_json::json!({ "text": text, "importance": importance }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let (app, _temp_dir) = local_app().await;

    let (status, json) = send(&app, empty_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

// =============================================================================
// Memories
// =============================================================================

#[tokio::test]
async fn test_create_and_list_memories() {
    let (app, _temp_dir) = local_app().await;

    let created = save(&app, "alice", "Dentist Thursday 3pm", 4).await;
    assert_eq!(created["text"], "Dentist Thursday 3pm");
    assert_eq!(created["importance"], 4);
    assert!(created["id"].as_str().is_some());

    save(&app, "alice", "Arsenal vs Man City on Sunday", 5).await;

    let (status, json) = send(&app, empty_request("GET", "/users/alice/memories")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    let memories = json["memories"].as_array().unwrap();
    assert_eq!(memories.len(), 2);
    assert_eq!(memories[0]["text"], "Arsenal vs Man City on Sunday");
}

#[tokio::test]
async fn test_create_defaults_and_clamps_importance() {
    let (app, _temp_dir) = local_app().await;

    let (_, json) = send(
        &app,
        json_request(
            "POST",
            "/users/alice/memories",
            serde_json::json!({ "text": "No importance given" }),
        ),
    )
    .await;
    assert_eq!(json["importance"], 3);

    let clamped = save(&app, "alice", "Very important", 42).await;
    assert_eq!(clamped["importance"], 5);
}

#[tokio::test]
async fn test_create_blank_memory_is_bad_request() {
    let (app, _temp_dir) = local_app().await;

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/users/alice/memories",
            serde_json::json!({ "text": "   " }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["type"], "invalid_memory");
}

#[tokio::test]
async fn test_list_search_and_limit() {
    let (app, _temp_dir) = local_app().await;

    save(&app, "alice", "Buy milk", 2).await;
    save(&app, "alice", "Buy a birthday card for Mum", 4).await;
    save(&app, "alice", "Physio Tuesday", 3).await;

    let (_, json) = send(&app, empty_request("GET", "/users/alice/memories?search=buy")).await;
    assert_eq!(json["memories"].as_array().unwrap().len(), 2);
    assert_eq!(json["total"], 3);

    let (_, json) = send(&app, empty_request("GET", "/users/alice/memories?limit=1")).await;
    let memories = json["memories"].as_array().unwrap();
    assert_eq!(memories.len(), 1);
    assert_eq!(memories[0]["text"], "Physio Tuesday");
}

#[tokio::test]
async fn test_users_do_not_see_each_other() {
    let (app, _temp_dir) = local_app().await;

    save(&app, "alice", "Alice's secret", 3).await;

    let (_, json) = send(&app, empty_request("GET", "/users/bob/memories")).await;
    assert_eq!(json["total"], 0);
    assert!(json["memories"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_memory() {
    let (app, _temp_dir) = local_app().await;

    let created = save(&app, "alice", "Temporary", 3).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        empty_request("DELETE", &format!("/users/alice/memories/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(
        &app,
        empty_request("DELETE", &format!("/users/alice/memories/{id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["type"], "memory_not_found");
}

#[tokio::test]
async fn test_delete_invalid_id() {
    let (app, _temp_dir) = local_app().await;

    let (status, json) = send(
        &app,
        empty_request("DELETE", "/users/alice/memories/not-a-uuid"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["type"], "invalid_id");
}

// =============================================================================
// Ask
// =============================================================================

#[tokio::test]
async fn test_ask_with_no_memories() {
    let (app, _temp_dir) = local_app().await;

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/users/alice/ask",
            serde_json::json!({ "question": "Who are Arsenal playing?" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["answer"], NO_MEMORIES);
    assert_eq!(json["source"], "local");
    assert!(json.get("notice").is_none());
}

#[tokio::test]
async fn test_ask_answers_from_memories_locally() {
    let (app, _temp_dir) = local_app().await;

    save(&app, "alice", "Arsenal vs Man City at the Emirates, Sunday 4:30pm", 5).await;
    save(&app, "alice", "Physio Tuesday 9am", 3).await;

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/users/alice/ask",
            serde_json::json!({ "question": "Who are Arsenal playing?" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        json["answer"]
            .as_str()
            .unwrap()
            .contains("Arsenal vs Man City at the Emirates, Sunday 4:30pm")
    );
}

#[tokio::test]
async fn test_ask_search_narrows_evidence() {
    let (app, _temp_dir) = local_app().await;

    save(&app, "alice", "Arsenal vs Man City on Sunday", 5).await;

    let (_, json) = send(
        &app,
        json_request(
            "POST",
            "/users/alice/ask",
            serde_json::json!({ "question": "Who are Arsenal playing?", "search": "physio" }),
        ),
    )
    .await;

    assert_eq!(json["answer"], NO_MEMORIES);
}

#[tokio::test]
async fn test_ask_blank_question_is_bad_request() {
    let (app, _temp_dir) = local_app().await;

    let (status, json) = send(
        &app,
        json_request(
            "POST",
            "/users/alice/ask",
            serde_json::json!({ "question": "  " }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["type"], "invalid_question");
}

#[tokio::test]
async fn test_ask_reports_remote_source() {
    let answerer = HybridAnswerer::with_remote(
        Box::new(MockAnswerer::replying("Arsenal play City on Sunday.")),
        LocalAnswerEngine::default(),
    );
    let (app, _temp_dir) = create_test_app(answerer).await;

    let (_, json) = send(
        &app,
        json_request(
            "POST",
            "/users/alice/ask",
            serde_json::json!({ "question": "Who are Arsenal playing?" }),
        ),
    )
    .await;

    assert_eq!(json["answer"], "Arsenal play City on Sunday.");
    assert_eq!(json["source"], "remote");
}

#[tokio::test]
async fn test_ask_reports_fallback_notice() {
    let answerer = HybridAnswerer::with_remote(
        Box::new(MockAnswerer::failing()),
        LocalAnswerEngine::default(),
    );
    let (app, _temp_dir) = create_test_app(answerer).await;

    save(&app, "alice", "Arsenal vs Man City on Sunday", 5).await;

    let (_, json) = send(
        &app,
        json_request(
            "POST",
            "/users/alice/ask",
            serde_json::json!({ "question": "Who are Arsenal playing?" }),
        ),
    )
    .await;

    assert_eq!(json["source"], "local");
    assert!(json["answer"].as_str().unwrap().contains("Arsenal vs Man City"));
    assert!(json["notice"].as_str().unwrap().contains("Mock failure"));
}
