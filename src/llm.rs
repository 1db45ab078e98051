//! LLM provider abstraction
//!
//! Provides a streaming interface to OpenAI-compatible chat completion
//! endpoints.

mod error;
mod openai;
#[cfg(test)]
pub mod testing;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub use types::*;

use async_trait::async_trait;

/// Common interface for streaming chat providers
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Start a streaming completion request.
    ///
    /// The returned stream yields raw delta fragments in arrival order;
    /// accumulation into the response-so-far is the consumer's concern.
    async fn stream_chat(&self, request: &CompletionRequest) -> Result<FragmentStream, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}
