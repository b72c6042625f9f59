//! Chat completion endpoint client.
//!
//! This module handles HTTP requests to an OpenAI-compatible chat completions
//! API and the typed response shapes the orchestrator branches on. Failures
//! are a typed [`EndpointError`] rather than an untyped exception, so callers
//! branch on an explicit tag.

use crate::config::Config;
use crate::tools::ToolRegistry;
use crate::transcript::Transcript;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::fmt;

/// Why the model stopped generating. Unrecognized values map to `Other` so a
/// provider extension doesn't break deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    ToolCalls,
    Length,
    ContentFilter,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Raw JSON argument string, passed through unparsed.
    pub arguments: String,
}

/// One requested call in a completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallRequest {
    #[serde(default)]
    pub id: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub finish_reason: FinishReason,
    pub message: ResponseMessage,
}

/// A full chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

impl ChatCompletion {
    /// The answer text of the first choice, if any.
    pub fn answer_text(&self) -> Option<&str> {
        self.choices.first()?.message.content.as_deref()
    }
}

/// Failure of a completion request.
///
/// Content-policy rejections and transport problems are distinguished here,
/// though the orchestrator deliberately collapses both into one outcome.
#[derive(Debug)]
pub enum EndpointError {
    /// The provider rejected the request on content-policy grounds.
    ContentFilter,
    /// Connection, timeout, HTTP, or response-decoding failure.
    Transport(String),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::ContentFilter => write!(f, "content filter triggered"),
            EndpointError::Transport(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EndpointError {}

/// Build the request body for one completion call.
///
/// Temperature is pinned to 0 and tool choice to `auto`: the contract relies
/// on deterministic tool selection for an identical transcript.
pub fn build_request_body(
    model: &str,
    transcript: &Transcript,
    registry: &ToolRegistry,
) -> serde_json::Value {
    let mut body = json!({
        "model": model,
        "messages": transcript.messages(),
        "temperature": 0,
    });
    if !registry.is_empty() {
        body["tools"] = json!(registry.api_format());
        body["tool_choice"] = json!("auto");
    }
    body
}

/// The endpoint seam the orchestrator drives. One blocking-style call per
/// request; no retries, no cancellation.
pub trait ChatEndpoint {
    fn complete(
        &self,
        request: serde_json::Value,
    ) -> impl std::future::Future<Output = Result<ChatCompletion, EndpointError>> + Send;
}

/// reqwest-backed [`ChatEndpoint`] for OpenAI-compatible APIs.
pub struct HttpChatEndpoint {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpChatEndpoint {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl ChatEndpoint for HttpChatEndpoint {
    fn complete(
        &self,
        request: serde_json::Value,
    ) -> impl std::future::Future<Output = Result<ChatCompletion, EndpointError>> + Send {
        async move {
            let response = self
                .client
                .post(&self.base_url)
                .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
                .header(CONTENT_TYPE, "application/json")
                .body(request.to_string())
                .send()
                .await
                .map_err(|e| EndpointError::Transport(format!("Failed to send request: {}", e)))?;

            if response.status() != StatusCode::OK {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                // Azure-style policy rejections come back as a 400 whose body
                // names the content filter.
                if body.contains("content_filter") || body.contains("content management policy") {
                    return Err(EndpointError::ContentFilter);
                }
                return Err(EndpointError::Transport(format!(
                    "API error ({}): {}",
                    status, body
                )));
            }

            response
                .json::<ChatCompletion>()
                .await
                .map_err(|e| EndpointError::Transport(format!("Failed to parse response: {}", e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ParamSpec, ToolDescriptor};
    use serde_json::{Map, Value};

    #[test]
    fn test_finish_reason_parsing() {
        assert_eq!(
            serde_json::from_str::<FinishReason>("\"tool_calls\"").unwrap(),
            FinishReason::ToolCalls
        );
        assert_eq!(
            serde_json::from_str::<FinishReason>("\"stop\"").unwrap(),
            FinishReason::Stop
        );
        assert_eq!(
            serde_json::from_str::<FinishReason>("\"some_future_reason\"").unwrap(),
            FinishReason::Other
        );
    }

    #[test]
    fn test_completion_with_tool_call_parses() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "model": "test-model",
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "get_article_abstract_by_id",
                            "arguments": "{\"id\":\"N1\"}"
                        }
                    }]
                }
            }]
        }"#;

        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        let choice = &completion.choices[0];
        assert_eq!(choice.finish_reason, FinishReason::ToolCalls);
        assert!(choice.message.content.is_none());
        let call = &choice.message.tool_calls[0];
        assert_eq!(call.function.name, "get_article_abstract_by_id");
        assert_eq!(call.function.arguments, "{\"id\":\"N1\"}");
    }

    #[test]
    fn test_answer_text_reads_first_choice() {
        let raw = r#"{
            "choices": [{
                "finish_reason": "stop",
                "message": { "role": "assistant", "content": "Here you go." }
            }]
        }"#;
        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        assert_eq!(completion.answer_text(), Some("Here you go."));
    }

    #[test]
    fn test_request_body_pins_temperature_and_tool_choice() {
        let mut registry = ToolRegistry::new();
        registry.register(
            ToolDescriptor::new(
                "get_article_abstract_by_title",
                "desc",
                vec![ParamSpec::required("title", "string")],
            ),
            |_args: &Map<String, Value>| Ok(String::new()),
        );
        let transcript = Transcript::new("system");

        let body = build_request_body("test-model", &transcript, &registry);
        assert_eq!(body["model"], "test-model");
        assert_eq!(body["temperature"], 0);
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_request_body_omits_tools_when_registry_empty() {
        let registry = ToolRegistry::new();
        let transcript = Transcript::new("system");

        let body = build_request_body("test-model", &transcript, &registry);
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }
}
