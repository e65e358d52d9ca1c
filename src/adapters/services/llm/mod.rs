//! LLM service adapters
//!
//! Implementations of the LlmServicePort trait:
//! - OpenAI (and OpenAI-compatible chat completion endpoints)

pub mod openai;

pub use openai::OpenAIService;
