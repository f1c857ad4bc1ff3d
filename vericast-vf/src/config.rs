//! Provider configuration resolution
//!
//! Two-tier resolution with ENV → TOML priority. Every provider is
//! independently optional: a missing key disables that provider's live path
//! and activates its documented fallback (inconclusive verdict, local
//! consensus, literal-reasoning correction). Configuration is resolved once
//! at startup and read-only afterwards.

use tracing::{info, warn};
use vericast_common::config::TomlConfig;

/// One provider's resolved settings
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// API key; `None` disables the provider
    pub api_key: Option<String>,
    /// Base URL override; adapters fall back to their compiled default
    pub base_url: Option<String>,
    /// Model name override (LLM providers only)
    pub model: Option<String>,
}

impl ProviderConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Resolved configuration for the verification pipeline
#[derive(Debug, Clone, Default)]
pub struct VerifierConfig {
    pub claude: ProviderConfig,
    pub fetchai: ProviderConfig,
    pub gemini: ProviderConfig,
    pub brightdata: ProviderConfig,
    /// Remote consensus gateway (model field unused)
    pub gateway: ProviderConfig,
}

impl VerifierConfig {
    /// Resolve all provider settings from environment and TOML config
    pub fn resolve(toml_config: &TomlConfig) -> Self {
        Self {
            claude: ProviderConfig {
                api_key: resolve_api_key(
                    "Claude",
                    "VERICAST_CLAUDE_API_KEY",
                    toml_config.claude_api_key.as_deref(),
                ),
                base_url: resolve_setting(
                    "VERICAST_CLAUDE_BASE_URL",
                    toml_config.claude_base_url.as_deref(),
                ),
                model: resolve_setting(
                    "VERICAST_CLAUDE_MODEL",
                    toml_config.claude_model.as_deref(),
                ),
            },
            fetchai: ProviderConfig {
                api_key: resolve_api_key(
                    "Fetch.ai",
                    "VERICAST_FETCHAI_API_KEY",
                    toml_config.fetchai_api_key.as_deref(),
                ),
                base_url: resolve_setting(
                    "VERICAST_FETCHAI_BASE_URL",
                    toml_config.fetchai_base_url.as_deref(),
                ),
                model: None,
            },
            gemini: ProviderConfig {
                api_key: resolve_api_key(
                    "Gemini",
                    "VERICAST_GEMINI_API_KEY",
                    toml_config.gemini_api_key.as_deref(),
                ),
                base_url: resolve_setting(
                    "VERICAST_GEMINI_BASE_URL",
                    toml_config.gemini_base_url.as_deref(),
                ),
                model: resolve_setting(
                    "VERICAST_GEMINI_MODEL",
                    toml_config.gemini_model.as_deref(),
                ),
            },
            brightdata: ProviderConfig {
                api_key: resolve_api_key(
                    "BrightData",
                    "VERICAST_BRIGHTDATA_API_KEY",
                    toml_config.brightdata_api_key.as_deref(),
                ),
                base_url: resolve_setting(
                    "VERICAST_BRIGHTDATA_BASE_URL",
                    toml_config.brightdata_base_url.as_deref(),
                ),
                model: None,
            },
            gateway: ProviderConfig {
                api_key: resolve_api_key(
                    "Consensus gateway",
                    "VERICAST_GATEWAY_API_KEY",
                    toml_config.gateway_api_key.as_deref(),
                ),
                base_url: resolve_setting(
                    "VERICAST_GATEWAY_BASE_URL",
                    toml_config.gateway_base_url.as_deref(),
                ),
                model: None,
            },
        }
    }

    /// Configuration with no provider credentials
    ///
    /// Every adapter returns its deterministic "API key not configured"
    /// verdict and consensus resolves locally. Used by tests and useful for
    /// offline smoke runs.
    pub fn unconfigured() -> Self {
        Self::default()
    }
}

/// Resolve one provider's API key from ENV → TOML
///
/// Absence is not an error: the provider is simply disabled.
fn resolve_api_key(provider: &str, env_var: &str, toml_key: Option<&str>) -> Option<String> {
    let env_key = std::env::var(env_var).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_key.filter(|k| is_valid_key(k)).map(str::to_string);

    match (env_key, toml_key) {
        (Some(key), Some(_)) => {
            warn!(
                "{} API key found in both environment and TOML config. Using environment (highest priority).",
                provider
            );
            Some(key)
        }
        (Some(key), None) => {
            info!("{} API key loaded from environment", provider);
            Some(key)
        }
        (None, Some(key)) => {
            info!("{} API key loaded from TOML config", provider);
            Some(key)
        }
        (None, None) => {
            info!("{} API key not configured; provider disabled", provider);
            None
        }
    }
}

/// Resolve a non-credential setting from ENV → TOML, no logging
fn resolve_setting(env_var: &str, toml_value: Option<&str>) -> Option<String> {
    std::env::var(env_var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| {
            toml_value
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        })
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("sk-test"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
        assert!(!is_valid_key("\t\n"));
    }

    #[test]
    #[serial]
    fn test_resolve_env_over_toml() {
        std::env::set_var("VERICAST_CLAUDE_API_KEY", "env-key");

        let toml_config = TomlConfig {
            claude_api_key: Some("toml-key".to_string()),
            ..Default::default()
        };
        let config = VerifierConfig::resolve(&toml_config);
        assert_eq!(config.claude.api_key.as_deref(), Some("env-key"));

        std::env::remove_var("VERICAST_CLAUDE_API_KEY");
    }

    #[test]
    #[serial]
    fn test_resolve_toml_fallback() {
        std::env::remove_var("VERICAST_GEMINI_API_KEY");

        let toml_config = TomlConfig {
            gemini_api_key: Some("toml-key".to_string()),
            gemini_model: Some("gemini-1.5-pro".to_string()),
            ..Default::default()
        };
        let config = VerifierConfig::resolve(&toml_config);
        assert_eq!(config.gemini.api_key.as_deref(), Some("toml-key"));
        assert_eq!(config.gemini.model.as_deref(), Some("gemini-1.5-pro"));
    }

    #[test]
    #[serial]
    fn test_resolve_whitespace_key_rejected() {
        std::env::set_var("VERICAST_BRIGHTDATA_API_KEY", "   ");

        let toml_config = TomlConfig::default();
        let config = VerifierConfig::resolve(&toml_config);
        assert!(config.brightdata.api_key.is_none());
        assert!(!config.brightdata.is_configured());

        std::env::remove_var("VERICAST_BRIGHTDATA_API_KEY");
    }

    #[test]
    #[serial]
    fn test_unconfigured_has_no_providers() {
        for var in [
            "VERICAST_CLAUDE_API_KEY",
            "VERICAST_FETCHAI_API_KEY",
            "VERICAST_GEMINI_API_KEY",
            "VERICAST_BRIGHTDATA_API_KEY",
            "VERICAST_GATEWAY_API_KEY",
        ] {
            std::env::remove_var(var);
        }

        let config = VerifierConfig::unconfigured();
        assert!(!config.claude.is_configured());
        assert!(!config.fetchai.is_configured());
        assert!(!config.gemini.is_configured());
        assert!(!config.brightdata.is_configured());
        assert!(!config.gateway.is_configured());
    }
}
