//! Core types and trait definitions for the verification pipeline
//!
//! The pipeline has three tiers:
//! - **Agents:** four provider adapters behind the `FactAgent` trait,
//!   executed concurrently per statement
//! - **Consensus:** aggregation of the four agent verdicts into one outcome
//! - **Correction:** synthesis of correction text for false statements
//!
//! Every tier is total: provider failures degrade to inconclusive verdicts
//! and never surface to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Verdicts
// ============================================================================

/// Ternary fact-check verdict
///
/// Serialized lowercase (`"true"` / `"false"` / `"inconclusive"`) — the
/// wire categories shared with every provider prompt and response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    True,
    False,
    Inconclusive,
}

impl Verdict {
    /// String representation matching the wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "true",
            Verdict::False => "false",
            Verdict::Inconclusive => "inconclusive",
        }
    }

    /// Parse a provider-supplied verdict string (case-insensitive)
    pub fn parse(s: &str) -> Option<Verdict> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(Verdict::True),
            "false" => Some(Verdict::False),
            "inconclusive" => Some(Verdict::Inconclusive),
            _ => None,
        }
    }
}

/// Consensus label exposed to the hosting application
///
/// Derived 1:1 from the consensus verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusLabel {
    VerifiedTrue,
    VerifiedFalse,
    Inconclusive,
}

impl From<Verdict> for ConsensusLabel {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::True => ConsensusLabel::VerifiedTrue,
            Verdict::False => ConsensusLabel::VerifiedFalse,
            Verdict::Inconclusive => ConsensusLabel::Inconclusive,
        }
    }
}

// ============================================================================
// Agent output
// ============================================================================

/// One provider's opinion of a statement
///
/// Invariant: always populated, even on provider failure (verdict
/// inconclusive, confidence 0, reasoning carries the error description).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentVerdict {
    /// Provider label ("Claude", "Fetch.ai", "Gemini", "BrightData")
    pub name: String,
    pub verdict: Verdict,
    /// Confidence score (0.0-1.0)
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl AgentVerdict {
    /// Create a verdict with clamped confidence (0.0-1.0)
    pub fn new(
        name: impl Into<String>,
        verdict: Verdict,
        confidence: f64,
        reasoning: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            verdict,
            confidence: confidence.clamp(0.0, 1.0),
            reasoning,
        }
    }

    /// Zero-confidence inconclusive verdict (missing credential, provider failure)
    pub fn inconclusive(name: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verdict: Verdict::Inconclusive,
            confidence: 0.0,
            reasoning: Some(reasoning.into()),
        }
    }
}

// ============================================================================
// Consensus output
// ============================================================================

/// Aggregate judgment over the four agent verdicts
///
/// `score` is the fraction of agreeing votes for decisive verdicts. For an
/// inconclusive verdict it is the fraction of the largest vote bucket, which
/// may differ from the inconclusive bucket itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConsensusOutcome {
    pub verdict: Verdict,
    /// Agreement score (0.0-1.0)
    pub score: f64,
}

// ============================================================================
// Verification result
// ============================================================================

/// One completed verification, immutable once returned
///
/// Serialized camelCase for the hosting application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Fresh identifier assigned at verification start
    pub statement_id: Uuid,
    /// True iff the consensus verdict is `false`
    pub is_false: bool,
    pub consensus: ConsensusLabel,
    /// Present iff `is_false`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_information: Option<String>,
    /// Fixed provider order: Claude, Fetch.ai, Gemini, BrightData
    pub agents: Vec<AgentVerdict>,
    /// The consensus outcome the verdict was derived from
    pub lava_gateway_consensus: ConsensusOutcome,
}

// ============================================================================
// Agent errors and trait
// ============================================================================

/// Provider call errors
///
/// Shared by all agent adapters and the gateway client. Never propagates
/// past an adapter boundary: `FactAgent::verify` maps every variant to an
/// inconclusive verdict.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Provider returned a non-success HTTP status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse provider response
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Fact-checking provider adapter
///
/// All adapters implement this trait for uniform concurrent execution.
/// `verify` is total: a missing credential or any provider failure produces
/// an inconclusive verdict instead of an error.
#[async_trait::async_trait]
pub trait FactAgent: Send + Sync {
    /// Provider label used in the ordered agents list
    fn name(&self) -> &'static str;

    /// Issue one provider request and map the response to a verdict
    ///
    /// Adapters with no configured credential return an inconclusive
    /// verdict here without attempting a network call.
    async fn request_verdict(&self, statement: &str) -> Result<AgentVerdict, AgentError>;

    /// Total verdict: every failure maps to inconclusive
    async fn verify(&self, statement: &str) -> AgentVerdict {
        match self.request_verdict(statement).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(agent = self.name(), error = %e, "Provider call failed");
                AgentVerdict::inconclusive(self.name(), format!("Error: {}", e))
            }
        }
    }
}
