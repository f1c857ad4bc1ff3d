//! Verification orchestrator
//!
//! Top-level entry point per statement: assigns a fresh statement id, fans
//! out to the four provider adapters concurrently, resolves consensus,
//! synthesizes a correction when the statement is judged false, and
//! assembles the immutable result.
//!
//! The orchestrator holds no mutable state; concurrent `verify_statement`
//! calls are independent. It is a total function over non-empty input:
//! every failure path below it degrades locally, so the caller always
//! receives a complete result.

use crate::agents::{
    AgentPool, BrightDataAgent, ClaudeAgent, ClaudeClient, FetchAiAgent, GeminiAgent,
};
use crate::config::VerifierConfig;
use crate::services::consensus_resolver::{ConsensusResolver, GatewayClient};
use crate::services::correction_synthesizer::CorrectionSynthesizer;
use crate::types::{FactAgent, VerificationResult, Verdict};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Statement verification pipeline
pub struct VerificationOrchestrator {
    agents: AgentPool,
    resolver: ConsensusResolver,
    synthesizer: CorrectionSynthesizer,
}

impl VerificationOrchestrator {
    /// Build the full pipeline from resolved configuration
    ///
    /// Agent order is fixed: Claude, Fetch.ai, Gemini, BrightData. Results
    /// are always assembled in this order regardless of response latency.
    pub fn from_config(config: &VerifierConfig) -> Self {
        let agents: Vec<Arc<dyn FactAgent>> = vec![
            Arc::new(ClaudeAgent::new(&config.claude)),
            Arc::new(FetchAiAgent::new(&config.fetchai)),
            Arc::new(GeminiAgent::new(&config.gemini)),
            Arc::new(BrightDataAgent::new(&config.brightdata)),
        ];

        Self::new(
            AgentPool::new(agents),
            ConsensusResolver::new(GatewayClient::from_config(&config.gateway)),
            CorrectionSynthesizer::new(ClaudeClient::from_config(&config.claude)),
        )
    }

    /// Assemble a pipeline from explicit components
    pub fn new(
        agents: AgentPool,
        resolver: ConsensusResolver,
        synthesizer: CorrectionSynthesizer,
    ) -> Self {
        Self {
            agents,
            resolver,
            synthesizer,
        }
    }

    /// Verify one statement; always returns a complete result
    pub async fn verify_statement(&self, statement: &str) -> VerificationResult {
        let statement_id = Uuid::new_v4();
        info!(
            statement_id = %statement_id,
            agents = self.agents.count(),
            "Starting statement verification"
        );

        let agents = self.agents.verify_all(statement).await;
        let consensus = self.resolver.resolve(&agents).await;

        let is_false = consensus.verdict == Verdict::False;
        let correct_information = if is_false {
            Some(self.synthesizer.synthesize(statement, &agents).await)
        } else {
            None
        };

        info!(
            statement_id = %statement_id,
            verdict = consensus.verdict.as_str(),
            score = consensus.score,
            "Verification complete"
        );

        VerificationResult {
            statement_id,
            is_false,
            consensus: consensus.verdict.into(),
            correct_information,
            agents,
            lava_gateway_consensus: consensus,
        }
    }
}
