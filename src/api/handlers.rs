//! API handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiError, AppState, SERVICE_NAME};
use crate::types::{now_timestamp, Message};
use crate::Error;

/// Liveness probe; never touches the database
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now_timestamp(),
        service: SERVICE_NAME.to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// List all messages, newest first
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<ListMessagesResponse>, ApiError> {
    let messages = state
        .store
        .list_messages()
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(ListMessagesResponse { messages }))
}

#[derive(Debug, Serialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<Message>,
}

/// Create a message from `{"content": ...}`
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateMessageResponse>), ApiError> {
    let content = extract_content(payload).map_err(|e| state.reject(e))?;

    let id = state
        .store
        .create_message(&content)
        .await
        .map_err(|e| state.reject(e))?;

    tracing::info!(id, "message created");
    Ok((StatusCode::CREATED, Json(CreateMessageResponse { id, content })))
}

#[derive(Debug, Serialize)]
pub struct CreateMessageResponse {
    pub id: i64,
    pub content: String,
}

fn extract_content(payload: Result<Json<Value>, JsonRejection>) -> Result<String, Error> {
    let Json(body) = payload.map_err(|rejection| Error::invalid_request(rejection.body_text()))?;

    match body.get("content") {
        Some(Value::String(content)) => Ok(content.clone()),
        Some(Value::Null) | None => Err(Error::invalid_request("missing field 'content'")),
        Some(_) => Err(Error::invalid_request("'content' must be a string")),
    }
}
