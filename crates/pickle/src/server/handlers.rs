use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::memory::types::{DEFAULT_IMPORTANCE, Memory, clamp_importance};
use crate::server::{ApiError, AppState};
use crate::storage::filter::MemoryFilter;

/// Memory as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMemory {
    pub id: String,
    pub text: String,
    pub importance: u8,
    pub created_at: DateTime<Utc>,
}

impl From<&Memory> for ApiMemory {
    fn from(memory: &Memory) -> Self {
        Self {
            id: memory.id.to_string(),
            text: memory.text.clone(),
            importance: memory.importance,
            created_at: memory.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct MemoriesQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoriesResponse {
    pub memories: Vec<ApiMemory>,
    pub total: usize,
}

pub async fn list_memories_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<MemoriesQuery>,
) -> Json<MemoriesResponse> {
    let mut filter = MemoryFilter::for_user(&user_id);
    if let Some(search) = query.search {
        filter = filter.with_search(search);
    }
    if let Some(limit) = query.limit {
        filter = filter.with_limit(limit);
    }

    let store = state.store.lock().await;
    let memories: Vec<ApiMemory> = store.list(&filter).iter().map(ApiMemory::from).collect();
    let total = store.count(&user_id);

    Json(MemoriesResponse { memories, total })
}

#[derive(Debug, Deserialize)]
pub struct CreateMemoryRequest {
    pub text: String,
    #[serde(default)]
    pub importance: Option<i64>,
}

pub async fn create_memory_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateMemoryRequest>,
) -> Result<(StatusCode, Json<ApiMemory>), ApiError> {
    let importance = request
        .importance
        .map(clamp_importance)
        .unwrap_or(DEFAULT_IMPORTANCE);

    let memory = state
        .store
        .lock()
        .await
        .insert(&user_id, &request.text, importance)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiMemory::from(&memory))))
}

pub async fn delete_memory_handler(
    State(state): State<Arc<AppState>>,
    Path((user_id, memory_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let id = Uuid::parse_str(&memory_id)
        .map_err(|e| ApiError::bad_request("invalid_id", format!("Invalid UUID format: {e}")))?;

    let deleted = state.store.lock().await.delete(&user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(
            "memory_not_found",
            format!("Memory not found: {memory_id}"),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Restrict evidence to memories containing this term
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(ApiError::bad_request(
            "invalid_question",
            "Question cannot be empty",
        ));
    }

    let mut filter = MemoryFilter::for_user(&user_id);
    if let Some(search) = request.search {
        filter = filter.with_search(search);
    }

    // Release the store before the remote call
    let memories = state.store.lock().await.list(&filter);
    tracing::debug!(
        "Answering for user {} with {} memories",
        user_id,
        memories.len()
    );

    let answer = state.answerer.ask(question, &memories).await;

    Ok(Json(AskResponse {
        notice: answer.notice(),
        source: answer.source.label().to_string(),
        answer: answer.text,
    }))
}
