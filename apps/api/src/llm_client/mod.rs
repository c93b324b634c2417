//! LLM Client: the single point of entry for all model calls in Tailor.
//!
//! ARCHITECTURAL RULE: No other module may call the provider API directly.
//! All LLM interactions MUST go through this module.
//!
//! Talks to any OpenAI-compatible chat completions endpoint (Groq by default).
//! Every call is attempted exactly once; there is no retry loop.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One prompt/response round trip: a system instruction plus a single user message.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
}

/// Seam between the generator and the model provider.
/// Implementations return the raw assistant text of a JSON-object completion.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl CompletionResponse {
    /// Extracts the text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// HTTP backend for OpenAI-compatible chat completions.
pub struct HttpChatBackend {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl HttpChatBackend {
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: request.system,
                },
                CompletionMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }
}

/// The single LLM client used by all services in Tailor.
/// Cheap to clone; the backend is shared.
#[derive(Clone)]
pub struct LlmClient {
    backend: Arc<dyn ChatBackend>,
}

impl LlmClient {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Makes a raw call to the model, returning the assistant text.
    pub async fn call(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
        self.backend.complete(request).await
    }

    /// Calls the model and deserializes the text response as JSON.
    /// The system prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        request: ChatRequest<'_>,
    ) -> Result<T, LlmError> {
        let text = self.call(request).await?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(&text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Canned backends for tests.
#[cfg(test)]
pub mod testing {
    use super::*;

    /// Returns the same text for every call.
    pub struct StaticBackend(pub String);

    #[async_trait]
    impl ChatBackend for StaticBackend {
        async fn complete(&self, _request: ChatRequest<'_>) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    /// Always fails as if the provider returned a server error.
    pub struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn complete(&self, _request: ChatRequest<'_>) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            })
        }
    }

    /// Picks a response from the user message; lets concurrent tests get distinct output.
    pub struct RoutingBackend(pub fn(&str) -> String);

    #[async_trait]
    impl ChatBackend for RoutingBackend {
        async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
            Ok((self.0)(request.user))
        }
    }

    pub fn client(backend: impl ChatBackend + 'static) -> LlmClient {
        LlmClient::new(Arc::new(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_completion_response_text_reads_first_choice() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        }"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("{\"a\": 1}"));
        assert_eq!(response.usage.unwrap().completion_tokens, 3);
    }

    #[test]
    fn test_completion_response_blank_content_is_none() {
        let json = r#"{"choices": [{"message": {"content": "   "}}]}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_completion_request_asks_for_json_object() {
        let body = CompletionRequest {
            model: DEFAULT_MODEL,
            messages: vec![CompletionMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.2,
            max_tokens: MAX_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_call_json_parses_fenced_output() {
        let llm = client(StaticBackend("```json\n{\"n\": 4}\n```".to_string()));
        let request = ChatRequest {
            system: "sys",
            user: "user",
            temperature: 0.0,
        };
        let value: serde_json::Value = llm.call_json(request).await.unwrap();
        assert_eq!(value["n"], 4);
    }

    #[tokio::test]
    async fn test_call_json_surfaces_parse_error() {
        let llm = client(StaticBackend("Sure! Here is your resume.".to_string()));
        let request = ChatRequest {
            system: "sys",
            user: "user",
            temperature: 0.0,
        };
        let result: Result<serde_json::Value, _> = llm.call_json(request).await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
