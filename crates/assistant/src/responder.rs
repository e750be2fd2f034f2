//! Chat Orchestration

use serde::Serialize;
use tracing::{debug, warn};

use crate::provider::ProviderHandle;
use crate::rules::RuleBasedResponder;

/// Instructions prepended to every provider prompt
const SYSTEM_CONTEXT: &str = "You are a friendly and helpful Smart Energy Assistant. 
Your role is to help users understand and optimize their energy consumption.

Key information:
- You can help predict energy consumption
- You provide tips for reducing energy usage
- You explain energy-related concepts
- You're knowledgeable about HVAC, lighting, renewable energy, and household appliances

Keep responses:
- Concise (2-3 sentences max)
- Friendly and conversational
- Focused on energy topics
- Helpful and actionable

If someone asks for predictions, tell them you can help collect their data step by step, or they can use the Prediction tab.";

/// Which responder produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoweredBy {
    Gemini,
    Fallback,
}

impl PoweredBy {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PoweredBy::Gemini => "gemini",
            PoweredBy::Fallback => "fallback",
        }
    }
}

/// Chat reply as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub powered_by: PoweredBy,
}

/// Provider-first chat responder
#[derive(Debug, Clone, Default)]
pub struct ChatResponder {
    provider: ProviderHandle,
    rules: RuleBasedResponder,
}

impl ChatResponder {
    /// Create a responder around the given provider handle
    pub fn new(provider: ProviderHandle) -> Self {
        Self {
            provider,
            rules: RuleBasedResponder,
        }
    }

    /// Answer a message. Provider errors degrade to the rule-based reply.
    pub async fn respond(&self, message: &str) -> ChatReply {
        let reply = match &self.provider {
            ProviderHandle::Ready(provider) => {
                let prompt = format!("{SYSTEM_CONTEXT}\n\nUser: {message}\nAssistant:");
                match provider.complete(&prompt).await {
                    Ok(text) => {
                        debug!("Gemini response: {} chars", text.len());
                        ChatReply {
                            response: text,
                            powered_by: PoweredBy::Gemini,
                        }
                    }
                    Err(e) => {
                        warn!("Gemini error: {}", e);
                        self.fallback(message)
                    }
                }
            }
            ProviderHandle::Unavailable => self.fallback(message),
        };

        metrics::counter!("energy_chat_replies_total", "powered_by" => reply.powered_by.as_str())
            .increment(1);
        reply
    }

    fn fallback(&self, message: &str) -> ChatReply {
        ChatReply {
            response: self.rules.respond(message).to_string(),
            powered_by: PoweredBy::Fallback,
        }
    }

    /// Whether an AI provider is configured
    pub fn has_provider(&self) -> bool {
        self.provider.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ChatConfig, CompletionProvider};
    use crate::ChatError;
    use async_trait::async_trait;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct Echo(Mutex<Option<String>>);

    #[async_trait]
    impl CompletionProvider for Echo {
        async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
            *self.0.lock().unwrap() = Some(prompt.to_string());
            Ok("Turn off idle devices.".to_string())
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    struct Broken;

    #[async_trait]
    impl CompletionProvider for Broken {
        async fn complete(&self, _prompt: &str) -> Result<String, ChatError> {
            Err(ChatError::Status {
                status: 503,
                body: "overloaded".to_string(),
            })
        }

        fn model(&self) -> &str {
            "broken"
        }
    }

    /// Serve `router` on an ephemeral port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1beta")
    }

    fn gemini_handle(base_url: String) -> ProviderHandle {
        ProviderHandle::resolve(&ChatConfig {
            api_key: Some("test-key".to_string()),
            models: vec!["gemini-test".to_string()],
            timeout_secs: 5,
            base_url,
        })
    }

    #[tokio::test]
    async fn test_unavailable_uses_rules() {
        let responder = ChatResponder::new(ProviderHandle::Unavailable);
        let reply = responder.respond("hello").await;
        assert_eq!(reply.powered_by, PoweredBy::Fallback);
        assert!(reply.response.starts_with("Hello! I'm your Smart Energy Assistant."));
        assert!(!responder.has_provider());
    }

    #[tokio::test]
    async fn test_provider_reply_and_prompt() {
        let echo = std::sync::Arc::new(Echo(Mutex::new(None)));
        let responder = ChatResponder::new(ProviderHandle::Ready(echo.clone()));

        let reply = responder.respond("How do I save power?").await;
        assert_eq!(reply.powered_by, PoweredBy::Gemini);
        assert_eq!(reply.response, "Turn off idle devices.");

        let prompt = echo.0.lock().unwrap().clone().unwrap();
        assert!(prompt.starts_with("You are a friendly and helpful Smart Energy Assistant."));
        assert!(prompt.ends_with("\n\nUser: How do I save power?\nAssistant:"));
    }

    #[tokio::test]
    async fn test_provider_error_falls_back() {
        let responder = ChatResponder::new(ProviderHandle::ready(Broken));
        let reply = responder.respond("thanks").await;
        assert_eq!(reply.powered_by, PoweredBy::Fallback);
        assert!(reply.response.starts_with("You're welcome!"));
    }

    #[tokio::test]
    async fn test_gemini_round_trip() {
        let router = Router::new().route(
            "/v1beta/models/:model",
            post(|Json(body): Json<Value>| async move {
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or("");
                assert!(prompt.contains("User: hi"));
                Json(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "Hi! Ask me about energy." }] }
                    }]
                }))
            }),
        );
        let responder = ChatResponder::new(gemini_handle(serve(router).await));

        let reply = responder.respond("hi").await;
        assert_eq!(reply.powered_by, PoweredBy::Gemini);
        assert_eq!(reply.response, "Hi! Ask me about energy.");
    }

    #[tokio::test]
    async fn test_gemini_http_error_falls_back() {
        let router = Router::new().route(
            "/v1beta/models/:model",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let responder = ChatResponder::new(gemini_handle(serve(router).await));

        let reply = responder.respond("explain").await;
        assert_eq!(reply.powered_by, PoweredBy::Fallback);
        assert!(reply.response.starts_with("I analyze energy consumption"));
    }

    #[tokio::test]
    async fn test_gemini_malformed_body_falls_back() {
        let router = Router::new().route(
            "/v1beta/models/:model",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let responder = ChatResponder::new(gemini_handle(serve(router).await));

        let reply = responder.respond("zzz").await;
        assert_eq!(reply.powered_by, PoweredBy::Fallback);
    }
}
