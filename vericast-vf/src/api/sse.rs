//! Connection-status event stream

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use std::convert::Infallible;

use crate::AppState;

/// GET /events
///
/// Heartbeat-only SSE stream; verification itself is request/response.
pub async fn event_stream(
    State(_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    vericast_common::sse::heartbeat_stream("vericast-vf")
}
