use crate::config::LlmConfig;
use crate::error::{service_message, GenerationError};
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

/// Sampling temperature sent with every request
pub const TEMPERATURE: f64 = 0.7;

/// Response length cap sent with every request
pub const MAX_TOKENS: u32 = 1000;

/// Chat-completions provider for Groq and other OpenAI-compatible endpoints
pub struct GroqProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GroqProvider {
    /// Create a provider from configuration.
    ///
    /// A missing key is not an error here; [`LlmProvider::complete`] reports it
    /// before any request is made.
    pub fn new(client: Client, config: &LlmConfig, api_key: Option<String>) -> Self {
        GroqProvider {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: Option<String>, base_url: String, model: String) -> Self {
        let config = LlmConfig {
            api_key: None,
            base_url,
            model,
            ..LlmConfig::default()
        };
        Self::new(Client::new(), &config, api_key)
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn provider_name(&self) -> &str {
        "groq"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationError::Configuration(
                "Language model API key is not configured. Set RECIPE_FINDER__LLM__API_KEY or GROQ_API_KEY."
                    .to_string(),
            )
        })?;

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": prompt}
                ],
                "temperature": TEMPERATURE,
                "max_tokens": MAX_TOKENS
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("{} answered {}: {}", self.provider_name(), status, body);
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                message: service_message(&body, "/error/message", "Failed to generate recipe"),
            });
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        match response_body["choices"][0]["message"]["content"].as_str() {
            Some(content) if !content.is_empty() => Ok(content.to_string()),
            _ => Err(GenerationError::EmptyResponse),
        }
    }
}
