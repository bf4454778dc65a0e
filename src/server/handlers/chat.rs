use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GetMessageRequest {
    /// Absent queries are handled downstream with a placeholder, matching
    /// the front-end's permissive contract.
    pub query: Option<String>,
}

/// `POST /get-message`: answer one user query with retrieved context.
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GetMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let reply = state.chat.answer(payload.query).await?;
    Ok(Json(reply))
}

/// `GET|POST /clear-memory`: reset the conversation to the persona turn.
pub async fn clear_memory(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.chat.clear_memory().await;
    Json(json!({"status": "Memory cleared"}))
}
