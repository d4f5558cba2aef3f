use axum::{Json, Router, extract::State, routing::get};
use tower_http::trace::TraceLayer;

use crate::{hub::AppState, response::ApiResponse};

pub mod grammar;
pub mod intents;

async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(serde_json::json!({
        "status": "ok",
        "handlers": state.registry.handler_count(),
    })))
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(intents::router())
        .merge(grammar::router());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
