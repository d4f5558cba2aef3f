//! Intent Routes - remote intent handling endpoint for Rhasspy
//!
//! ```text
//! Rhasspy  --POST /api/intent-->  registry.dispatch  -->  handler
//!          <--{intent, time_sec, response}--
//! ```

use std::time::Instant;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use rhasspy_client::{IntentReplyBody, RhasspyIntentPayload};
use serde::Serialize;
use tracing::info;

use crate::{
    conversation::schedule_follow_up, error::ApiError, hub::AppState, response::ApiResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/intent", post(handle_intent))
        .route("/intents", get(list_intents))
}

async fn handle_intent(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<IntentReplyBody>, ApiError> {
    let received = Instant::now();
    info!("Received intent: {}", body);

    let payload: RhasspyIntentPayload = serde_json::from_str(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid intent payload: {}", e)))?;

    let name = payload.intent_name().to_string();
    let mut response = String::new();
    if payload.is_recognized() {
        let reply = state.registry.dispatch(&payload.into_intent()).await;
        if reply.continue_conversation() {
            schedule_follow_up(state.listener.clone(), state.conversation_delay);
        }
        response = reply.text().to_string();
    }

    info!("Response: {}", response);
    Ok(Json(IntentReplyBody::new(name, received.elapsed(), response)))
}

#[derive(Debug, Serialize)]
struct IntentsSummary {
    handlers: usize,
    intents: Vec<String>,
}

async fn list_intents(State(state): State<AppState>) -> Json<ApiResponse<IntentsSummary>> {
    Json(ApiResponse::success(IntentsSummary {
        handlers: state.registry.handler_count(),
        intents: state
            .registry
            .intent_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    }))
}
