//! Server-Sent Events support

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::StreamExt;

/// Convert a stream of response snapshots into an SSE response.
///
/// Each `message` event carries the full response so far; clients replace
/// previously displayed content rather than appending.
pub fn sse_stream(
    snapshots: impl Stream<Item = String> + Send + 'static,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = snapshots.map(|content| Ok(snapshot_event(&content)));

    Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn snapshot_event(content: &str) -> Event {
    Event::default()
        .event("message")
        .data(json!({ "content": content }).to_string())
}
