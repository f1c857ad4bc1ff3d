//! Fact-checking provider adapters
//!
//! Four independent adapters behind the `FactAgent` trait:
//! - **claude** - Anthropic messages API, JSON-in-text verdict
//! - **fetchai** - Fetch.ai verification endpoint, pre-structured verdict
//! - **gemini** - Gemini generateContent API, JSON-in-text verdict
//! - **brightdata** - search API, verdict inferred from result count
//!
//! All adapters run concurrently per statement via `AgentPool`. Failed
//! adapters degrade to inconclusive verdicts and never block or fail the
//! batch.

pub mod brightdata;
pub mod claude;
pub mod fetchai;
pub mod gemini;

pub use brightdata::BrightDataAgent;
pub use claude::{ClaudeAgent, ClaudeClient};
pub use fetchai::FetchAiAgent;
pub use gemini::GeminiAgent;

use crate::types::{AgentError, AgentVerdict, FactAgent, Verdict};
use futures::future::join_all;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// User agent sent on all provider requests
pub(crate) const USER_AGENT: &str = "Vericast/0.1.0 (https://github.com/vericast/vericast)";

/// Per-request client timeout
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared reqwest client used by provider adapters
pub(crate) fn build_http_client() -> Result<reqwest::Client, AgentError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AgentError::Network(e.to_string()))
}

/// Concurrent agent executor
///
/// Runs all agents concurrently and collects verdicts in construction
/// order, regardless of completion order. One slow or failing provider
/// delays but never fails the batch: each adapter self-recovers to an
/// inconclusive verdict.
pub struct AgentPool {
    agents: Vec<Arc<dyn FactAgent>>,
}

impl AgentPool {
    /// Create a pool; verdict order follows the given agent order
    pub fn new(agents: Vec<Arc<dyn FactAgent>>) -> Self {
        Self { agents }
    }

    /// Verify a statement with every agent concurrently
    ///
    /// Join semantics preserve input order, not completion order.
    pub async fn verify_all(&self, statement: &str) -> Vec<AgentVerdict> {
        let futures = self.agents.iter().map(|agent| {
            let agent = Arc::clone(agent);
            async move {
                let verdict = agent.verify(statement).await;
                debug!(
                    agent = agent.name(),
                    verdict = verdict.verdict.as_str(),
                    confidence = verdict.confidence,
                    "Agent verdict collected"
                );
                verdict
            }
        });

        join_all(futures).await
    }

    /// Get agent count
    pub fn count(&self) -> usize {
        self.agents.len()
    }
}

// ============================================================================
// LLM verdict prompt and response parsing
// ============================================================================

/// Fact-check prompt shared by the LLM providers (Claude, Gemini)
///
/// The instruction text and the ternary categories are part of the live
/// provider contract and must stay stable.
pub(crate) fn verdict_prompt(statement: &str) -> String {
    format!(
        "You are a fact-checking assistant. Analyze the following statement and determine whether it is true, false, or inconclusive.\n\n\
         Statement: \"{statement}\"\n\n\
         Respond with ONLY a JSON object in exactly this format:\n\
         {{\"verdict\": \"true\" or \"false\" or \"inconclusive\", \"confidence\": <number between 0.0 and 1.0>, \"reasoning\": \"<brief explanation>\"}}"
    )
}

/// The JSON shape LLM providers are instructed to answer with
#[derive(Debug, Deserialize)]
pub(crate) struct VerdictPayload {
    pub verdict: Verdict,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Parse a verdict JSON object out of an LLM text response
///
/// Models occasionally wrap the requested JSON in prose or code fences, so
/// a direct parse is followed by a first-`{`-to-last-`}` extraction. A
/// response with no parseable verdict is a parse error, which the adapter
/// maps to an inconclusive verdict.
pub(crate) fn parse_verdict_json(text: &str) -> Result<VerdictPayload, AgentError> {
    let trimmed = text.trim();
    if let Ok(payload) = serde_json::from_str::<VerdictPayload>(trimmed) {
        return Ok(payload);
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(payload) = serde_json::from_str::<VerdictPayload>(&trimmed[start..=end]) {
                return Ok(payload);
            }
        }
    }

    let preview: String = trimmed.chars().take(120).collect();
    Err(AgentError::Parse(format!(
        "no verdict JSON in model response: {}",
        preview
    )))
}

// ============================================================================
// Mock agent for testing
// ============================================================================


// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_preserves_order() {
        let agents: Vec<Arc<dyn FactAgent>> = vec![
            Arc::new(mock::MockAgent::new("First", Verdict::True, 0.9)),
            Arc::new(mock::MockAgent::new("Second", Verdict::False, 0.8)),
            Arc::new(mock::MockAgent::new("Third", Verdict::Inconclusive, 0.1)),
        ];

        let pool = AgentPool::new(agents);
        let verdicts = pool.verify_all("test statement").await;

        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts[0].name, "First");
        assert_eq!(verdicts[1].name, "Second");
        assert_eq!(verdicts[2].name, "Third");
    }

    #[tokio::test]
    async fn test_pool_failure_isolation() {
        let agents: Vec<Arc<dyn FactAgent>> = vec![
            Arc::new(mock::MockAgent::new("Good", Verdict::True, 0.9)),
            Arc::new(mock::MockAgent::failing("Bad")),
        ];

        let pool = AgentPool::new(agents);
        let verdicts = pool.verify_all("test statement").await;

        // A failing agent still yields a verdict slot
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[1].name, "Bad");
        assert_eq!(verdicts[1].verdict, Verdict::Inconclusive);
        assert_eq!(verdicts[1].confidence, 0.0);
        assert!(verdicts[1]
            .reasoning
            .as_deref()
            .unwrap()
            .starts_with("Error:"));
    }

    #[test]
    fn test_pool_count() {
        let agents: Vec<Arc<dyn FactAgent>> = vec![
            Arc::new(mock::MockAgent::new("One", Verdict::True, 0.5)),
            Arc::new(mock::MockAgent::new("Two", Verdict::True, 0.5)),
        ];
        assert_eq!(AgentPool::new(agents).count(), 2);
    }

    #[test]
    fn test_parse_verdict_json_direct() {
        let payload = parse_verdict_json(
            r#"{"verdict": "false", "confidence": 0.92, "reasoning": "Contradicted by satellite imagery."}"#,
        )
        .unwrap();
        assert_eq!(payload.verdict, Verdict::False);
        assert_eq!(payload.confidence, 0.92);
        assert!(payload.reasoning.is_some());
    }

    #[test]
    fn test_parse_verdict_json_wrapped_in_prose() {
        let text = "Here is my analysis:\n```json\n{\"verdict\": \"true\", \"confidence\": 0.8, \"reasoning\": \"Well documented.\"}\n```\nLet me know if you need more.";
        let payload = parse_verdict_json(text).unwrap();
        assert_eq!(payload.verdict, Verdict::True);
        assert_eq!(payload.confidence, 0.8);
    }

    #[test]
    fn test_parse_verdict_json_missing_reasoning() {
        let payload =
            parse_verdict_json(r#"{"verdict": "inconclusive", "confidence": 0.5}"#).unwrap();
        assert_eq!(payload.verdict, Verdict::Inconclusive);
        assert!(payload.reasoning.is_none());
    }

    #[test]
    fn test_parse_verdict_json_garbage() {
        assert!(parse_verdict_json("I cannot determine this.").is_err());
        assert!(parse_verdict_json("").is_err());
        assert!(parse_verdict_json("{not json}").is_err());
    }

    #[test]
    fn test_verdict_prompt_contains_contract() {
        let prompt = verdict_prompt("The Earth is flat");
        assert!(prompt.contains("The Earth is flat"));
        assert!(prompt.contains("\"true\" or \"false\" or \"inconclusive\""));
        assert!(prompt.contains("confidence"));
        assert!(prompt.contains("reasoning"));
    }
}
