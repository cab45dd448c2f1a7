use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::Settings;
use crate::error::GenerationError;
use crate::pipeline::RecipePipeline;
use crate::providers::GroqProvider;
use crate::repository::{BackendClient, RecipeRepository};
use crate::videos::YouTubeSearch;

/// Builder for configuring a [`RecipePipeline`]
///
/// Values set directly on the builder take precedence over [`Settings`].
#[derive(Default)]
pub struct RecipePipelineBuilder {
    settings: Option<Settings>,
    api_key: Option<String>,
    model: Option<String>,
    llm_base_url: Option<String>,
    video_api_key: Option<String>,
    video_base_url: Option<String>,
    backend_url: Option<String>,
    repository: Option<Arc<dyn RecipeRepository>>,
    timeout: Option<Duration>,
}

impl RecipePipelineBuilder {
    /// Start from loaded settings
    ///
    /// # Example
    /// ```no_run
    /// use recipe_finder::{RecipePipeline, Settings};
    ///
    /// let settings = Settings::load().unwrap();
    /// let builder = RecipePipeline::builder().settings(settings);
    /// ```
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the API key for the language model service
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipePipeline;
    ///
    /// let builder = RecipePipeline::builder().api_key("gsk_your_key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name sent to the language model service
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the language model client at another OpenAI-compatible endpoint
    pub fn llm_base_url(mut self, url: impl Into<String>) -> Self {
        self.llm_base_url = Some(url.into());
        self
    }

    /// Set the API key for the video search service
    pub fn video_api_key(mut self, key: impl Into<String>) -> Self {
        self.video_api_key = Some(key.into());
        self
    }

    pub fn video_base_url(mut self, url: impl Into<String>) -> Self {
        self.video_base_url = Some(url.into());
        self
    }

    /// Base URL of the backend used for analytics logging
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Use an existing repository instead of creating a backend client
    pub fn repository(mut self, repository: Arc<dyn RecipeRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set a timeout for every HTTP request
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipePipeline;
    /// use std::time::Duration;
    ///
    /// let builder = RecipePipeline::builder().timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Build the pipeline
    ///
    /// Missing credentials do not fail here; they surface as configuration
    /// errors when the corresponding service is first used.
    ///
    /// # Errors
    /// Returns [`GenerationError::Transport`] if the HTTP client cannot be created.
    pub fn build(self) -> Result<RecipePipeline, GenerationError> {
        let mut settings = self.settings.unwrap_or_default();

        if let Some(key) = self.api_key {
            settings.llm.api_key = Some(key);
        }
        if let Some(model) = self.model {
            settings.llm.model = model;
        }
        if let Some(url) = self.llm_base_url {
            settings.llm.base_url = url;
        }
        if let Some(key) = self.video_api_key {
            settings.videos.api_key = Some(key);
        }
        if let Some(url) = self.video_base_url {
            settings.videos.base_url = url;
        }
        if let Some(url) = self.backend_url {
            settings.backend.base_url = url;
        }

        let mut client = Client::builder();
        if let Some(timeout) = self.timeout.or(settings.timeout.map(Duration::from_secs)) {
            client = client.timeout(timeout);
        }
        let client = client.build()?;

        let provider = GroqProvider::new(client.clone(), &settings.llm, settings.llm_api_key());
        let videos = YouTubeSearch::new(client.clone(), &settings.videos, settings.video_api_key());
        let repository = self.repository.unwrap_or_else(|| {
            Arc::new(BackendClient::new(client, &settings.backend)) as Arc<dyn RecipeRepository>
        });

        Ok(RecipePipeline::new(
            Box::new(provider),
            Box::new(videos),
            Some(repository),
        ))
    }
}
