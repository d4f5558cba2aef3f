use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use intents::{CompiledGrammar, PublishReport};

use crate::{error::ApiError, hub::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grammar", get(compiled_grammar))
        .route("/grammar/publish", post(publish_grammar))
}

/// Current grammar, compiled but not uploaded
async fn compiled_grammar(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CompiledGrammar>>, ApiError> {
    let grammar = state.updater.compile()?;
    Ok(Json(ApiResponse::success(grammar)))
}

/// Recompile, upload and retrain
async fn publish_grammar(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PublishReport>>, ApiError> {
    let report = state.updater.update().await?;
    Ok(Json(ApiResponse::success(report)))
}
