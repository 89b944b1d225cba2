//! LLM port - The boundary to the generative model
//!
//! The application only needs "send an instruction and a text, get raw text
//! back". Model choice, auth and transport live behind this trait.

use async_trait::async_trait;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A request to the model
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub messages: Vec<ChatMessage>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    /// Ask the model for a JSON object response
    pub json_output: bool,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system_prompt: None,
            temperature: None,
            json_output: false,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Raw model output
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub tokens_used: u32,
}

/// Errors that know whether another attempt could succeed
pub trait RetryableError {
    /// Timeouts, throttling and server-side failures are worth retrying;
    /// bad requests and auth failures are not.
    fn is_retryable(&self) -> bool;
}

/// Port for generative model calls
#[async_trait]
pub trait LlmPort: Send + Sync {
    type Error: std::error::Error + RetryableError + Send + Sync + 'static;

    /// Generate a completion for the request
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, Self::Error>;
}
