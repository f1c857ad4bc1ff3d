//! Statement verification endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::types::{VerificationResult, Verdict};
use crate::AppState;

/// Verification request body
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// The factual claim to check
    pub statement: String,
}

/// POST /verify
///
/// Runs the full pipeline for one statement. Degraded provider
/// availability shows up as inconclusive verdicts and low confidence, never
/// as an error response; the only error is an empty statement.
pub async fn verify_statement(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> ApiResult<Json<VerificationResult>> {
    let statement = request.statement.trim();
    if statement.is_empty() {
        return Err(ApiError::BadRequest(
            "statement must not be empty".to_string(),
        ));
    }

    let result = state.orchestrator.verify_statement(statement).await;

    // Surface a fully-degraded run in /health diagnostics
    let all_unavailable = result
        .agents
        .iter()
        .all(|a| a.verdict == Verdict::Inconclusive && a.confidence == 0.0);
    if all_unavailable {
        *state.last_error.write().await =
            Some("all providers unavailable or unconfigured".to_string());
    }

    if result.is_false {
        info!(statement_id = %result.statement_id, "Statement verified false");
    }

    Ok(Json(result))
}

/// Build verification routes
pub fn verify_routes() -> Router<AppState> {
    Router::new().route("/verify", post(verify_statement))
}
