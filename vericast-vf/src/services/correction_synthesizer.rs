//! Correction synthesizer
//!
//! Produces the short correction text spoken to the user when consensus
//! says a statement is false. Preference order: LLM synthesis over the
//! false-voting agents' reasoning, then the first agent's literal
//! reasoning, then a fixed generic message when no reasoning exists.
//! Total: a failed synthesis call falls through, never raises.

use crate::agents::ClaudeClient;
use crate::types::{AgentVerdict, Verdict};
use tracing::{debug, warn};

const GENERIC_CORRECTION: &str =
    "This statement has been determined to be false, but specific corrections are unavailable.";

/// Correction text builder
pub struct CorrectionSynthesizer {
    claude: Option<ClaudeClient>,
}

impl CorrectionSynthesizer {
    pub fn new(claude: Option<ClaudeClient>) -> Self {
        Self { claude }
    }

    /// Build the correction for a statement judged false
    pub async fn synthesize(&self, statement: &str, agents: &[AgentVerdict]) -> String {
        let reasonings: Vec<&str> = agents
            .iter()
            .filter(|a| a.verdict == Verdict::False)
            .filter_map(|a| a.reasoning.as_deref())
            .filter(|r| !r.trim().is_empty())
            .collect();

        if reasonings.is_empty() {
            debug!("No false-agent reasoning available; using generic correction");
            return GENERIC_CORRECTION.to_string();
        }

        if let Some(claude) = &self.claude {
            match claude.complete(&correction_prompt(statement, &reasonings)).await {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        return text.to_string();
                    }
                    warn!("Empty synthesis response; using agent reasoning");
                }
                Err(e) => {
                    warn!(error = %e, "Correction synthesis failed; using agent reasoning");
                }
            }
        }

        format!("Correction: {}", reasonings[0])
    }
}

/// Synthesis prompt over the numbered false-agent reasonings
fn correction_prompt(statement: &str, reasonings: &[&str]) -> String {
    let numbered = reasonings
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {}", i + 1, r))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "The following statement has been fact-checked and determined to be false:\n\n\
         \"{statement}\"\n\n\
         The fact-checkers provided this reasoning:\n\
         {numbered}\n\n\
         Write a concise 2-3 sentence correction stating the accurate information."
    )
}
