//! Completion Providers

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::ChatError;

/// Key shipped in the sample environment file; never a real credential
const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Chat provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Gemini API key; absent disables the provider
    pub api_key: Option<String>,
    /// Candidate model names, in preference order
    pub models: Vec<String>,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
    /// API root, overridable for testing
    pub base_url: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            models: vec![
                "gemini-1.5-flash-latest".to_string(),
                "gemini-1.5-pro-latest".to_string(),
                "gemini-pro".to_string(),
            ],
            timeout_secs: 30,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Text-completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete a prompt into a reply
    async fn complete(&self, prompt: &str) -> Result<String, ChatError>;

    /// Model identifier for logs and health output
    fn model(&self) -> &str;
}

/// Google Gemini `generateContent` client
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a client for one model
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!("Gemini request to model {}", self.model);
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ChatError::MalformedResponse(
                    "missing candidates[0].content.parts[0].text".to_string(),
                )
            })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Provider availability, resolved once at startup
#[derive(Clone, Default)]
pub enum ProviderHandle {
    /// No provider; every message goes to the rule-based responder
    #[default]
    Unavailable,
    /// Configured provider
    Ready(Arc<dyn CompletionProvider>),
}

impl ProviderHandle {
    /// Resolve the Gemini provider from configuration.
    ///
    /// A missing, empty or placeholder key, an empty model list, or a
    /// client construction failure all yield [`ProviderHandle::Unavailable`].
    pub fn resolve(config: &ChatConfig) -> Self {
        let api_key = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => key,
            _ => {
                warn!("Gemini API key not found - using fallback chatbot");
                return Self::Unavailable;
            }
        };

        let timeout = Duration::from_secs(config.timeout_secs);
        for model in config.models.iter().filter(|m| !m.trim().is_empty()) {
            match GeminiProvider::new(api_key, model.trim(), config.base_url.as_str(), timeout) {
                Ok(provider) => {
                    info!("Gemini AI configured with model: {}", provider.model());
                    return Self::ready(provider);
                }
                Err(e) => warn!("Could not initialize Gemini model {}: {}", model, e),
            }
        }

        warn!("Could not initialize any Gemini model - using fallback chatbot");
        Self::Unavailable
    }

    /// Wrap an already constructed provider
    pub fn ready(provider: impl CompletionProvider + 'static) -> Self {
        Self::Ready(Arc::new(provider))
    }

    /// Whether a provider is configured
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("Unavailable"),
            Self::Ready(provider) => f.debug_tuple("Ready").field(&provider.model()).finish(),
        }
    }
}
