//! Configuration file loading
//!
//! Vericast services read an optional TOML config file. Every field is
//! optional: a missing file or a missing key falls back to environment
//! variables and compiled defaults at the service layer.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// TOML configuration shared by Vericast services
///
/// Keys mirror the `VERICAST_*` environment variables. Environment values
/// take priority over TOML values during resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub claude_api_key: Option<String>,
    pub claude_base_url: Option<String>,
    pub claude_model: Option<String>,

    pub fetchai_api_key: Option<String>,
    pub fetchai_base_url: Option<String>,

    pub gemini_api_key: Option<String>,
    pub gemini_base_url: Option<String>,
    pub gemini_model: Option<String>,

    pub brightdata_api_key: Option<String>,
    pub brightdata_base_url: Option<String>,

    pub gateway_api_key: Option<String>,
    pub gateway_base_url: Option<String>,
}

/// Locate the config file for the platform
///
/// Checks `~/.config/vericast/vericast.toml` (or the platform equivalent)
/// first, then `/etc/vericast/vericast.toml` on Linux. Returns `None` when
/// no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("vericast").join("vericast.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/vericast/vericast.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Parse a config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load configuration, tolerating a missing or malformed file
///
/// A malformed file is logged and treated as absent so a bad config never
/// prevents service startup (all providers simply resolve as unconfigured).
pub fn load_config() -> TomlConfig {
    match find_config_file() {
        Some(path) => match load_toml_config(&path) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                TomlConfig::default()
            }
        },
        None => {
            info!("No config file found; using environment and defaults");
            TomlConfig::default()
        }
    }
}
