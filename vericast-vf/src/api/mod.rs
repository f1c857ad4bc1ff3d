//! HTTP API handlers
//!
//! REST + SSE surface consumed by the hosting application:
//! - `POST /verify` - verify one statement
//! - `GET /health` - service health and uptime
//! - `GET /events` - heartbeat SSE stream for connection status

mod health;
mod sse;
mod verify;

pub use health::{health_check, health_routes};
pub use sse::event_stream;
pub use verify::{verify_routes, verify_statement};
