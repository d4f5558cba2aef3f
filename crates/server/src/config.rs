//! Intent hub configuration
//!
//! Loaded from `intent-hub.toml` (or the file named by `INTENT_HUB_CONFIG`),
//! then overridden by environment variables.

use std::{collections::BTreeMap, net::SocketAddr, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_VAR: &str = "INTENT_HUB_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "intent-hub.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubConfig {
    /// Address the intent listener binds to; Rhasspy posts intents here
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Rhasspy HTTP API root used for training and speech
    #[serde(default = "default_rhasspy_api_url")]
    pub rhasspy_api_url: String,

    /// Compile and upload the grammar before serving
    #[serde(default = "default_true")]
    pub publish_on_startup: bool,

    /// Pause before re-opening the microphone for a follow-up command
    #[serde(default = "default_conversation_delay_ms")]
    pub conversation_delay_ms: u64,

    /// Name of the speaker backed by `rhasspy_api_url`
    #[serde(default = "default_speaker_name")]
    pub default_speaker: String,

    /// Additional selectable speakers: name → Rhasspy API root
    #[serde(default)]
    pub speakers: BTreeMap<String, String>,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8081))
}

fn default_rhasspy_api_url() -> String {
    "http://localhost:12101/api".to_string()
}

fn default_true() -> bool {
    true
}

fn default_conversation_delay_ms() -> u64 {
    1000
}

fn default_speaker_name() -> String {
    "Raspberry".to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            rhasspy_api_url: default_rhasspy_api_url(),
            publish_on_startup: true,
            conversation_delay_ms: default_conversation_delay_ms(),
            default_speaker: default_speaker_name(),
            speakers: BTreeMap::new(),
        }
    }
}

impl HubConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Config file to read, if any
    pub fn config_path() -> Option<PathBuf> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                path.exists().then_some(path)
            }
        }
    }

    /// Load from file (defaults if there is none), then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_path() {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read {
                        path: path.display().to_string(),
                        source,
                    })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from `lookup` (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("INTENT_HUB_LISTEN_ADDR") {
            self.listen_addr = parse_value("INTENT_HUB_LISTEN_ADDR", &value)?;
        }
        if let Some(value) = lookup("RHASSPY_API_URL") {
            self.rhasspy_api_url = value;
        }
        if let Some(value) = lookup("INTENT_HUB_PUBLISH_ON_STARTUP") {
            self.publish_on_startup = parse_value("INTENT_HUB_PUBLISH_ON_STARTUP", &value)?;
        }
        if let Some(value) = lookup("INTENT_HUB_CONVERSATION_DELAY_MS") {
            self.conversation_delay_ms = parse_value("INTENT_HUB_CONVERSATION_DELAY_MS", &value)?;
        }
        Ok(())
    }

    pub fn conversation_delay(&self) -> Duration {
        Duration::from_millis(self.conversation_delay_ms)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
