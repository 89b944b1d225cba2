//! Ollama client for scene extraction (OpenAI-compatible chat completions)

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{
    ChatMessage, LlmPort, LlmRequest, LlmResponse, MessageRole, RetryableError,
};

/// Client for an Ollama server's `/chat/completions` endpoint
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmPort for OllamaClient {
    type Error = LlmClientError;

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, Self::Error> {
        let body = ChatCompletionRequest::from_llm_request(&self.model, &request);

        tracing::debug!(
            model = %self.model,
            messages = body.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiError {
                status,
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion.into_llm_response()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

impl ChatCompletionRequest {
    fn from_llm_request(model: &str, request: &LlmRequest) -> Self {
        let system = request.system_prompt.as_ref().map(|prompt| WireMessage {
            role: MessageRole::System.as_str(),
            content: prompt.clone(),
        });

        let messages = system
            .into_iter()
            .chain(request.messages.iter().map(WireMessage::from))
            .collect();

        Self {
            model: model.to_string(),
            messages,
            temperature: request.temperature,
            response_format: request.json_output.then(|| ResponseFormat {
                kind: "json_object",
            }),
            stream: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u32,
}

impl ChatCompletionResponse {
    fn into_llm_response(self) -> Result<LlmResponse, LlmClientError> {
        let content = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmClientError::InvalidResponse("response has no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            model: self.model,
            tokens_used: self.usage.map(|u| u.total_tokens).unwrap_or(0),
        })
    }
}

/// Errors from the Ollama client
#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: StatusCode, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RetryableError for LlmClientError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            Self::ApiError { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Self::InvalidResponse(_) => false,
        }
    }
}
