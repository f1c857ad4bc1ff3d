//! Server-Sent Events (SSE) utilities
//!
//! Shared SSE implementation for Vericast services.

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, info};

/// Heartbeat interval for connection-status streams
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// Create a heartbeat-only SSE stream for connection status monitoring
///
/// Verification is request/response shaped, so the service has no domain
/// events to broadcast; the hosting UI still needs a stream to drive its
/// connected/disconnected indicator.
///
/// # Example
/// ```rust,ignore
/// pub async fn event_stream(
///     State(_state): State<AppState>,
/// ) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
///     vericast_common::sse::heartbeat_stream("vericast-vf")
/// }
/// ```
pub fn heartbeat_stream(
    service_name: &'static str,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to {} events", service_name);

    let stream = async_stream::stream! {
        // Initial connected status so the UI flips immediately
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            tokio::time::sleep(HEARTBEAT_INTERVAL).await;
            debug!(service = service_name, "SSE heartbeat");
            yield Ok(Event::default().comment("heartbeat"));
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(HEARTBEAT_INTERVAL)
            .text("heartbeat"),
    )
}
