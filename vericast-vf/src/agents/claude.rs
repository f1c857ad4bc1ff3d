//! Claude fact-check agent
//!
//! Wraps the Anthropic messages API. The model is asked for the fixed JSON
//! verdict shape inside a natural-language completion; the response text is
//! parsed with fallback extraction. `ClaudeClient` is also reused by the
//! correction synthesizer for its one synthesis call.

use crate::agents::{build_http_client, parse_verdict_json, verdict_prompt};
use crate::config::ProviderConfig;
use crate::types::{AgentError, AgentVerdict, FactAgent};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Low-level Anthropic messages API client
pub struct ClaudeClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ClaudeClient {
    /// Create a client from provider config; `None` when no key is configured
    pub fn from_config(config: &ProviderConfig) -> Option<Self> {
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

    /// Send one user prompt and return the first content block's text
    pub async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                {"role": "user", "content": prompt}
            ],
        });

        debug!(model = %self.model, "Querying Claude messages API");

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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
        struct ContentBlock {
            text: String,
        }
        #[derive(Deserialize)]
        struct MessagesResponse {
            content: Vec<ContentBlock>,
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| AgentError::Parse("empty content in Claude response".to_string()))
    }
}

/// Claude fact-check adapter
pub struct ClaudeAgent {
    client: Option<ClaudeClient>,
}

impl ClaudeAgent {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: ClaudeClient::from_config(config),
        }
    }
}

#[async_trait::async_trait]
impl FactAgent for ClaudeAgent {
    fn name(&self) -> &'static str {
        "Claude"
    }

    async fn request_verdict(&self, statement: &str) -> Result<AgentVerdict, AgentError> {
        let Some(client) = &self.client else {
            return Ok(AgentVerdict::inconclusive(
                self.name(),
                "API key not configured",
            ));
        };

        let text = client.complete(&verdict_prompt(statement)).await?;
        let payload = parse_verdict_json(&text)?;

        Ok(AgentVerdict::new(
            self.name(),
            payload.verdict,
            payload.confidence,
            payload.reasoning,
        ))
    }
}
