//! API request and response types

use crate::llm::ChatTurn;
use serde::{Deserialize, Serialize};

/// Request to run one chat turn
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns of the conversation, oldest first, excluding the system
    /// message and the turn being submitted
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Interface metadata for the chat front-end
#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub title: String,
    pub description: String,
    pub examples: Vec<String>,
}
