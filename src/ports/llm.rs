/// LLM service port trait
///
/// Defines the interface for Large Language Model completion services.
/// Implementations: OpenAI-compatible chat completions.
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single prompt exchange sent to the completion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Optional system message establishing the assistant's role
    pub system: Option<String>,

    /// The user message
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(system: Option<&str>, prompt: String) -> Self {
        Self {
            system: system.map(str::to_string),
            prompt,
        }
    }
}

/// Configuration for LLM requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model name (e.g., "gpt-3.5-turbo", "gpt-4")
    pub model: String,

    /// Temperature for generation (0.0 to 1.0)
    pub temperature: Option<f32>,

    /// Maximum tokens in response
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: Some(0.3), // Lower temperature for more focused outputs
            max_tokens: Some(2000),
        }
    }
}

/// Port trait for LLM services
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmServicePort: Send + Sync {
    /// Runs one completion and returns the first choice's text
    async fn complete(&self, request: &CompletionRequest, config: &LlmConfig) -> Result<String>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Check if the service is configured (has API key)
    fn is_configured(&self) -> bool;
}
