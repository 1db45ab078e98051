//! Turn handling: message assembly and streaming accumulation
//!
//! Drives one conversation turn against the provider. The produced stream
//! yields the full response-so-far after each fragment, not the fragment
//! itself, so a renderer replaces what it showed previously.

use crate::llm::{ChatService, ChatTurn, CompletionRequest, LlmError, Role};
use crate::prompt::compose_system_prompt;
use futures::stream::Stream;
use futures::StreamExt;
use std::sync::Arc;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

/// Prefix of the reply shown when the provider fails at any point in a turn
pub const CONNECTION_ERROR_PREFIX: &str =
    "Sorry, I'm having trouble connecting right now. Error: ";

/// Build the ordered message list for one turn: the composed system turn
/// first, the prior history as supplied, then the new user turn.
pub fn build_messages(message: &str, history: &[ChatTurn]) -> Vec<ChatTurn> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatTurn::new(Role::System, compose_system_prompt(message)));
    messages.extend_from_slice(history);
    messages.push(ChatTurn::new(Role::User, message));
    messages
}

/// Stream the assistant's reply for one turn.
///
/// Yields the accumulated response after each non-empty fragment. On any
/// provider failure the stream yields the apology message as its final item
/// and ends; errors never propagate to the caller. Dropping the stream
/// abandons the turn and releases the underlying connection.
pub fn stream_reply(
    service: Arc<dyn ChatService>,
    message: String,
    history: Vec<ChatTurn>,
) -> impl Stream<Item = String> {
    async_stream::stream! {
        let request = CompletionRequest {
            messages: build_messages(&message, &history),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(
            model = %service.model_id(),
            history_len = history.len(),
            "Starting turn"
        );

        let mut fragments = match service.stream_chat(&request).await {
            Ok(stream) => stream,
            Err(e) => {
                yield connection_error_reply(&e);
                return;
            }
        };

        let mut response = String::new();
        while let Some(fragment) = fragments.next().await {
            match fragment {
                Ok(fragment) => {
                    if fragment.is_empty() {
                        continue;
                    }
                    response.push_str(&fragment);
                    yield response.clone();
                }
                Err(e) => {
                    yield connection_error_reply(&e);
                    return;
                }
            }
        }

        tracing::info!(
            model = %service.model_id(),
            chars = response.len(),
            "Turn complete"
        );
    }
}

fn connection_error_reply(error: &LlmError) -> String {
    tracing::warn!(kind = ?error.kind, error = %error.message, "Provider failure during turn");
    format!("{CONNECTION_ERROR_PREFIX}{error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::MockChatService;
    use crate::prompt::{BASE_SYSTEM_MESSAGE, BELT_ADDON};

    fn turn(role: Role, content: &str) -> ChatTurn {
        ChatTurn::new(role, content)
    }

    async fn collect(
        service: Arc<MockChatService>,
        message: &str,
        history: Vec<ChatTurn>,
    ) -> Vec<String> {
        stream_reply(service, message.to_string(), history)
            .collect()
            .await
    }

    #[test]
    fn messages_are_system_history_user() {
        let history = vec![
            turn(Role::User, "What's on sale?"),
            turn(Role::Assistant, "Hats are 60% off!"),
        ];
        let messages = build_messages("I'll take one", &history);

        assert_eq!(messages.len(), history.len() + 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1], history[0]);
        assert_eq!(messages[2], history[1]);
        assert_eq!(messages[3].role, Role::User);
        assert_eq!(messages[3].content, "I'll take one");
    }

    #[test]
    fn empty_message_still_builds_full_list() {
        let messages = build_messages("", &[]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "");
    }

    #[tokio::test]
    async fn snapshots_grow_with_each_fragment() {
        let mock = Arc::new(MockChatService::new("test-model"));
        mock.queue_fragments(&["Hi", " there", "!"]);

        let replies = collect(mock, "hello", vec![]).await;
        assert_eq!(replies, vec!["Hi", "Hi there", "Hi there!"]);
    }

    #[tokio::test]
    async fn empty_fragments_are_skipped() {
        let mock = Arc::new(MockChatService::new("test-model"));
        mock.queue_fragments(&["", "Hello", ""]);

        let replies = collect(mock, "hello", vec![]).await;
        assert_eq!(replies, vec!["Hello"]);
    }

    #[tokio::test]
    async fn midstream_failure_ends_with_apology() {
        let mock = Arc::new(MockChatService::new("test-model"));
        mock.queue_failure_after(&["Partial"], LlmError::network("connection reset"));

        let replies = collect(mock, "hello", vec![]).await;
        assert_eq!(replies[0], "Partial");

        let last = replies.last().unwrap();
        assert!(last.starts_with(CONNECTION_ERROR_PREFIX));
        assert!(last.contains("connection reset"));
    }

    #[tokio::test]
    async fn connect_failure_yields_single_apology() {
        let mock = Arc::new(MockChatService::new("test-model"));
        mock.queue_connect_error(LlmError::auth("bad key"));

        let replies = collect(mock, "hello", vec![]).await;
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with(CONNECTION_ERROR_PREFIX));
        assert!(replies[0].contains("bad key"));
    }

    #[tokio::test]
    async fn request_carries_fixed_parameters() {
        let mock = Arc::new(MockChatService::new("test-model"));
        mock.queue_fragments(&["ok"]);

        collect(mock.clone(), "hello", vec![turn(Role::User, "earlier")]).await;

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, Role::System);
    }

    #[tokio::test]
    async fn belt_mention_reaches_system_prompt() {
        let mock = Arc::new(MockChatService::new("test-model"));
        mock.queue_fragments(&["ok"]);

        collect(mock.clone(), "Do you sell Belts?", vec![]).await;

        let requests = mock.recorded_requests();
        let system = &requests[0].messages[0].content;
        assert!(system.starts_with(BASE_SYSTEM_MESSAGE));
        assert!(system.ends_with(BELT_ADDON));
    }
}
