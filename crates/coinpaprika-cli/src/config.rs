/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed client configuration
[POS]:    Configuration layer - API endpoint, identity and timeouts
[UPDATE]: When adding new configuration options
*/

use std::time::Duration;

use anyhow::Context;
use coinpaprika_api::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, TransportConfig};
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level configuration for the command line client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// API root every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Bearer token for authenticated endpoints
    #[serde(default)]
    pub token: Option<String>,
    /// Whole-request timeout in seconds; unset means no limit
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Connection timeout in seconds; unset keeps the transport default
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            token: None,
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.base_url()?;
        Ok(config)
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        Url::parse(&self.base_url).with_context(|| format!("invalid base_url {:?}", self.base_url))
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}
