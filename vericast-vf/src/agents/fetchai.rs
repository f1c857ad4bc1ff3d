//! Fetch.ai fact-check agent
//!
//! The Fetch.ai endpoint pre-structures its answer, so response fields are
//! read directly with documented defaults instead of parsing JSON out of
//! model text: confidence defaults to 0.8 and reasoning to a fixed string.

use crate::agents::build_http_client;
use crate::config::ProviderConfig;
use crate::types::{AgentError, AgentVerdict, FactAgent, Verdict};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.fetch.ai";
const DEFAULT_CONFIDENCE: f64 = 0.8;
const DEFAULT_REASONING: &str = "Verified by Fetch.ai agent network";

struct FetchAiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Pre-structured verification response
#[derive(Debug, Deserialize)]
struct FetchAiResponse {
    verdict: Option<String>,
    confidence: Option<f64>,
    reasoning: Option<String>,
}

impl FetchAiClient {
    fn from_config(config: &ProviderConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let http_client = build_http_client().ok()?;
        Some(Self {
            http_client,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    async fn verify(&self, statement: &str) -> Result<FetchAiResponse, AgentError> {
        let url = format!("{}/v1/verify", self.base_url);
        let body = serde_json::json!({
            "statement": statement,
            "task": "fact_verification",
        });

        debug!("Querying Fetch.ai verification API");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))
    }
}

/// Fetch.ai fact-check adapter
pub struct FetchAiAgent {
    client: Option<FetchAiClient>,
}

impl FetchAiAgent {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: FetchAiClient::from_config(config),
        }
    }
}

#[async_trait::async_trait]
impl FactAgent for FetchAiAgent {
    fn name(&self) -> &'static str {
        "Fetch.ai"
    }

    async fn request_verdict(&self, statement: &str) -> Result<AgentVerdict, AgentError> {
        let Some(client) = &self.client else {
            return Ok(AgentVerdict::inconclusive(
                self.name(),
                "API key not configured",
            ));
        };

        let response = client.verify(statement).await?;

        let verdict = response
            .verdict
            .as_deref()
            .and_then(Verdict::parse)
            .unwrap_or(Verdict::Inconclusive);

        Ok(AgentVerdict::new(
            self.name(),
            verdict,
            response.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            Some(
                response
                    .reasoning
                    .unwrap_or_else(|| DEFAULT_REASONING.to_string()),
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_verdict() {
        let agent = FetchAiAgent::new(&ProviderConfig::default());
        let verdict = agent.verify("The moon is made of cheese").await;

        assert_eq!(verdict.name, "Fetch.ai");
        assert_eq!(verdict.verdict, Verdict::Inconclusive);
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.reasoning.as_deref(), Some("API key not configured"));
    }

    #[test]
    fn test_response_defaults() {
        // Sparse provider responses deserialize with every field absent
        let response: FetchAiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.verdict.is_none());
        assert_eq!(response.confidence.unwrap_or(DEFAULT_CONFIDENCE), 0.8);
        assert_eq!(
            response.reasoning.unwrap_or_else(|| DEFAULT_REASONING.to_string()),
            DEFAULT_REASONING
        );
    }

    #[test]
    fn test_response_full() {
        let response: FetchAiResponse = serde_json::from_str(
            r#"{"verdict": "false", "confidence": 0.91, "reasoning": "Refuted by sources."}"#,
        )
        .unwrap();
        assert_eq!(
            response.verdict.as_deref().and_then(Verdict::parse),
            Some(Verdict::False)
        );
        assert_eq!(response.confidence, Some(0.91));
    }

    #[test]
    fn test_unknown_verdict_string_maps_to_inconclusive() {
        let verdict = Some("uncertain".to_string())
            .as_deref()
            .and_then(Verdict::parse)
            .unwrap_or(Verdict::Inconclusive);
        assert_eq!(verdict, Verdict::Inconclusive);
    }
}
