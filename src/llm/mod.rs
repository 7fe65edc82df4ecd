//! LLM client abstraction used for answer synthesis.
//!
//! The answer provider only needs plain completion; the trait stays
//! small so tests can swap in a canned client.

use crate::types::Result;
use async_trait::async_trait;

/// OpenAI-compatible client implementation.
pub mod openai;

pub use openai::OpenAiClient;

/// Generic LLM client trait for provider abstraction.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with a system prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}
