//! Mock implementations for testing
//!
//! These mocks enable turn-handler and API testing without real I/O.

use super::types::{CompletionRequest, FragmentStream};
use super::{ChatService, LlmError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

enum Script {
    Fragments(Vec<Result<String, LlmError>>),
    ConnectError(LlmError),
}

/// Mock chat service that replays queued fragment sequences
pub struct MockChatService {
    scripts: Mutex<VecDeque<Script>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl MockChatService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            scripts: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a streamed reply made of the given fragments
    pub fn queue_fragments(&self, fragments: &[&str]) {
        self.scripts.lock().unwrap().push_back(Script::Fragments(
            fragments.iter().map(|f| Ok((*f).to_string())).collect(),
        ));
    }

    /// Queue a reply whose stream fails after yielding the given fragments
    pub fn queue_failure_after(&self, fragments: &[&str], error: LlmError) {
        let mut items: Vec<Result<String, LlmError>> =
            fragments.iter().map(|f| Ok((*f).to_string())).collect();
        items.push(Err(error));
        self.scripts
            .lock()
            .unwrap()
            .push_back(Script::Fragments(items));
    }

    /// Queue a call that fails before producing any fragment
    pub fn queue_connect_error(&self, error: LlmError) {
        self.scripts
            .lock()
            .unwrap()
            .push_back(Script::ConnectError(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for MockChatService {
    async fn stream_chat(&self, request: &CompletionRequest) -> Result<FragmentStream, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.scripts.lock().unwrap().pop_front() {
            Some(Script::Fragments(items)) => Ok(Box::pin(futures::stream::iter(items))),
            Some(Script::ConnectError(e)) => Err(e),
            None => Err(LlmError::network("No mock script queued")),
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
