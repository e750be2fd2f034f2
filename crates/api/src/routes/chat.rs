//! Chatbot Routes

use assistant::ChatReply;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::AppState;

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Chat failure body; carries only the apology text
#[derive(Debug, Serialize)]
pub struct ChatFailure {
    pub response: String,
}

/// `POST /api/chatbot`
pub async fn chatbot(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, (StatusCode, Json<ChatFailure>)> {
    let Json(request) = body.map_err(|e| {
        warn!("Chatbot error: {}", e.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ChatFailure {
                response: format!("Sorry, I encountered an error: {}", e.body_text()),
            }),
        )
    })?;

    let message = request.message.trim();
    debug!("Chatbot received: {}", message);

    Ok(Json(state.chat.respond(message).await))
}
