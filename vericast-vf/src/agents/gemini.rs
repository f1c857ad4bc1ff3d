//! Gemini fact-check agent
//!
//! Wraps the generateContent API. Same prompt/JSON contract as the Claude
//! adapter; the response text lives at `candidates[0].content.parts[0].text`
//! and authentication is a query-parameter key rather than a header.

use crate::agents::{build_http_client, parse_verdict_json, verdict_prompt};
use crate::config::ProviderConfig;
use crate::types::{AgentError, AgentVerdict, FactAgent};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
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
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [
                {"parts": [{"text": prompt}]}
            ],
        });

        debug!(model = %self.model, "Querying Gemini generateContent API");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(status.as_u16(), error_text));
        }

        #[derive(Deserialize)]
        struct Part {
            text: String,
        }
        #[derive(Deserialize)]
        struct Content {
            parts: Vec<Part>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: Content,
        }
        #[derive(Deserialize)]
        struct GenerateResponse {
            candidates: Vec<Candidate>,
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| AgentError::Parse("empty candidates in Gemini response".to_string()))
    }
}

/// Gemini fact-check adapter
pub struct GeminiAgent {
    client: Option<GeminiClient>,
}

impl GeminiAgent {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: GeminiClient::from_config(config),
        }
    }
}

#[async_trait::async_trait]
impl FactAgent for GeminiAgent {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn request_verdict(&self, statement: &str) -> Result<AgentVerdict, AgentError> {
        let Some(client) = &self.client else {
            return Ok(AgentVerdict::inconclusive(
                self.name(),
                "API key not configured",
            ));
        };

        let text = client.generate(&verdict_prompt(statement)).await?;
        let payload = parse_verdict_json(&text)?;

        Ok(AgentVerdict::new(
            self.name(),
            payload.verdict,
            payload.confidence,
            payload.reasoning,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Verdict;

    #[test]
    fn test_client_defaults() {
        let config = ProviderConfig {
            api_key: Some("g-test".to_string()),
            base_url: None,
            model: None,
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_unconfigured_verdict() {
        let agent = GeminiAgent::new(&ProviderConfig::default());
        let verdict = agent.verify("Water boils at 100 degrees Celsius at sea level").await;

        assert_eq!(verdict.name, "Gemini");
        assert_eq!(verdict.verdict, Verdict::Inconclusive);
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.reasoning.as_deref(), Some("API key not configured"));
    }
}
