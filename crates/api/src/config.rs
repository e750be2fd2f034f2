//! Server Configuration
//!
//! Layered with the `config` crate: struct defaults, then an optional
//! `energy.toml`, then `ENERGY_*` environment variables. `GEMINI_API_KEY`
//! is honoured on its own as the conventional name for the chat key.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use assistant::ChatConfig;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use tracing::Level;

use crate::error::ServerError;

/// Default configuration file stem, resolved relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "energy";

/// Server configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
    /// ONNX model artifact; missing file selects the fallback formula
    pub model_path: PathBuf,
    /// Review document
    pub reviews_path: PathBuf,
    /// Gemini API key; absent selects the rule-based chatbot
    pub gemini_api_key: Option<String>,
    /// Gemini model candidates, in preference order
    pub gemini_models: Vec<String>,
    /// Gemini API root
    pub gemini_base_url: String,
    /// Chat provider request timeout (seconds)
    pub chat_timeout_secs: u64,
    /// Max tracing level (`error`..`trace`)
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
    /// Allow cross-origin requests from any origin
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let chat = ChatConfig::default();
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            model_path: PathBuf::from("energy_model.onnx"),
            reviews_path: PathBuf::from("reviews.json"),
            gemini_api_key: chat.api_key,
            gemini_models: chat.models,
            gemini_base_url: chat.base_url,
            chat_timeout_secs: chat.timeout_secs,
            log_level: "info".to_string(),
            log_json: false,
            cors_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Load from `energy.toml` (if present) and the environment
    pub fn load() -> Result<Self, ServerError> {
        let builder = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
        Self::finish(builder)
    }

    /// Load from an explicit file and the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let builder = Config::builder().add_source(File::from(path.as_ref()));
        Self::finish(builder)
    }

    fn finish(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ServerError> {
        let settings = builder
            .add_source(
                Environment::with_prefix("ENERGY")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("gemini_models"),
            )
            .set_override_option("gemini_api_key", std::env::var("GEMINI_API_KEY").ok())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parsed max log level
    pub fn log_level(&self) -> Result<Level, ServerError> {
        Level::from_str(self.log_level.trim())
            .map_err(|_| ServerError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Chat provider settings
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            api_key: self.gemini_api_key.clone(),
            models: self.gemini_models.clone(),
            timeout_secs: self.chat_timeout_secs,
            base_url: self.gemini_base_url.clone(),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("model_path", &self.model_path)
            .field("reviews_path", &self.reviews_path)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_models", &self.gemini_models)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("chat_timeout_secs", &self.chat_timeout_secs)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("cors_enabled", &self.cors_enabled)
            .finish()
    }
}
