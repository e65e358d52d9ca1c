//! OpenAI LLM service adapter
//!
//! Implements the LlmServicePort for OpenAI's chat completions API and any
//! endpoint speaking the same protocol (set via the base URL).

use crate::error::{AppError, Result};
use crate::ports::llm::{CompletionRequest, LlmConfig, LlmServicePort};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default transport timeout for a completion call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI service implementation
pub struct OpenAIService {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAIService {
    /// Create a new OpenAI service with the given API key
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_options(api_key, OPENAI_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Create a service against a specific base URL and transport timeout
    pub fn with_options(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_messages(request: &CompletionRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: Some(system.clone()),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: Some(request.prompt.clone()),
        });
        messages
    }
}

#[async_trait]
impl LlmServicePort for OpenAIService {
    async fn complete(&self, request: &CompletionRequest, config: &LlmConfig) -> Result<String> {
        let request_body = ChatCompletionRequest {
            model: config.model.clone(),
            messages: Self::build_messages(request),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        log::info!(
            "Calling OpenAI chat completion with model: {}",
            config.model
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Chat completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!(
                "Chat completion failed ({}): {}",
                status, error_text
            )));
        }

        let completion_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::Llm(format!("Failed to parse completion response: {}", e))
        })?;

        let content = completion_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::Llm("분석 결과를 받을 수 없습니다.".to_string()))?;

        log::info!(
            "OpenAI completion successful, generated {} characters",
            content.len()
        );

        Ok(content)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
