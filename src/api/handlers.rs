//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{ChatRequest, MetaResponse};
use super::AppState;
use crate::chat::stream_reply;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Streaming chat turns
        .route("/api/chat", post(chat))
        // Front-end metadata
        .route("/api/meta", get(get_meta))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

/// Run one chat turn, streaming the reply as it grows.
///
/// Each SSE `message` event holds the full reply so far, including the
/// apology reply when the provider fails. A client that disconnects simply
/// stops consuming; the turn is abandoned with it.
async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> impl IntoResponse {
    sse_stream(stream_reply(state.service.clone(), req.message, req.history))
}

const EXAMPLE_PROMPTS: &[&str] = &[
    "What items do you have on sale?",
    "I'm looking for a hat",
    "Do you have any shoes?",
    "What should I buy today?",
];

async fn get_meta() -> Json<MetaResponse> {
    Json(MetaResponse {
        title: "Clothes Store Assistant".to_string(),
        description: "Welcome to our store! I'm here to help you find great deals. Ask me about our items!"
            .to_string(),
        examples: EXAMPLE_PROMPTS.iter().map(|s| (*s).to_string()).collect(),
    })
}

async fn get_version() -> &'static str {
    concat!("shopfront ", env!("CARGO_PKG_VERSION"))
}
