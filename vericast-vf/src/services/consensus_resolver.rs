//! Consensus resolver
//!
//! Aggregates the four agent verdicts into one outcome. A configured remote
//! gateway is preferred and trusted verbatim; any gateway failure falls back
//! to the local vote count. Resolution is total and never raises.

use crate::agents::build_http_client;
use crate::config::ProviderConfig;
use crate::types::{AgentError, AgentVerdict, ConsensusOutcome, Verdict};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Fraction of agreeing votes required for a decisive verdict
///
/// Compared against integer vote fractions over the four agents, so the
/// effective cutoff is 3 of 4 (2/4 = 0.5 falls short).
const CONSENSUS_THRESHOLD: f64 = 0.6;

/// Remote consensus gateway client
pub struct GatewayClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GatewayClient {
    /// Create a client from gateway config; `None` when no key is configured
    pub fn from_config(config: &ProviderConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let http_client = build_http_client().ok()?;
        Some(Self {
            http_client,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://gateway.lavanet.xyz".to_string()),
        })
    }

    /// Submit the agent votes and return the gateway's outcome verbatim
    async fn resolve_remote(
        &self,
        agents: &[AgentVerdict],
    ) -> Result<ConsensusOutcome, AgentError> {
        let url = format!("{}/v1/consensus", self.base_url);
        let votes: Vec<serde_json::Value> = agents
            .iter()
            .map(|a| {
                serde_json::json!({
                    "name": a.name,
                    "verdict": a.verdict,
                    "confidence": a.confidence,
                })
            })
            .collect();

        debug!(votes = votes.len(), "Submitting votes to consensus gateway");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "agents": votes }))
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(status.as_u16(), error_text));
        }

        #[derive(Deserialize)]
        struct GatewayResponse {
            verdict: Verdict,
            score: f64,
        }

        let parsed: GatewayResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        Ok(ConsensusOutcome {
            verdict: parsed.verdict,
            score: parsed.score,
        })
    }
}

/// Consensus resolver with gateway-first, local-fallback semantics
pub struct ConsensusResolver {
    gateway: Option<GatewayClient>,
}

impl ConsensusResolver {
    pub fn new(gateway: Option<GatewayClient>) -> Self {
        Self { gateway }
    }

    /// Aggregate agent verdicts into one outcome; never fails
    pub async fn resolve(&self, agents: &[AgentVerdict]) -> ConsensusOutcome {
        if let Some(gateway) = &self.gateway {
            match gateway.resolve_remote(agents).await {
                Ok(outcome) => {
                    info!(
                        verdict = outcome.verdict.as_str(),
                        score = outcome.score,
                        "Gateway consensus"
                    );
                    return outcome;
                }
                Err(e) => {
                    warn!(error = %e, "Gateway consensus failed; falling back to local vote");
                }
            }
        }

        local_consensus(agents)
    }
}

/// Local vote-count consensus
///
/// Reference semantics for the gateway as well: false checked before true;
/// neither bucket reaching the threshold yields an inconclusive verdict
/// whose score is the fraction of the largest bucket, which may not be the
/// inconclusive bucket.
pub fn local_consensus(agents: &[AgentVerdict]) -> ConsensusOutcome {
    let total = agents.len();
    if total == 0 {
        return ConsensusOutcome {
            verdict: Verdict::Inconclusive,
            score: 0.0,
        };
    }

    let false_count = agents
        .iter()
        .filter(|a| a.verdict == Verdict::False)
        .count();
    let true_count = agents.iter().filter(|a| a.verdict == Verdict::True).count();
    let inconclusive_count = total - false_count - true_count;
    let total = total as f64;

    let outcome = if false_count as f64 / total >= CONSENSUS_THRESHOLD {
        ConsensusOutcome {
            verdict: Verdict::False,
            score: false_count as f64 / total,
        }
    } else if true_count as f64 / total >= CONSENSUS_THRESHOLD {
        ConsensusOutcome {
            verdict: Verdict::True,
            score: true_count as f64 / total,
        }
    } else {
        let largest = false_count.max(true_count).max(inconclusive_count);
        ConsensusOutcome {
            verdict: Verdict::Inconclusive,
            score: largest as f64 / total,
        }
    };

    debug!(
        false_count,
        true_count,
        inconclusive_count,
        verdict = outcome.verdict.as_str(),
        score = outcome.score,
        "Local consensus"
    );

    outcome
}
