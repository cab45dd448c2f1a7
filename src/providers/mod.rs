mod groq;
mod prompt;

pub use groq::GroqProvider;
pub use prompt::{build_recipe_prompt, RECIPE_PROMPT_TEMPLATE};

use crate::error::GenerationError;
use async_trait::async_trait;

/// A language model that answers a single prompt with free text
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "groq")
    fn provider_name(&self) -> &str;

    /// Get the model identifier sent with each request
    fn model_name(&self) -> &str;

    /// Send one prompt and return the model's text answer
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}
