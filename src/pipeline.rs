//! Recipe generation: prompt, model call, extraction, then best-effort enrichment.
//!
//! Only the first three steps decide success. Video search and analytics
//! logging run afterwards, concurrently, and report through their own fields
//! of [`Generation`]; neither can turn a generated recipe into an error.

use crate::error::{GenerationError, RepositoryError, VideoSearchError};
use crate::extract::extract_recipe;
use crate::model::{Recipe, VideoResult};
use crate::providers::{build_recipe_prompt, LlmProvider};
use crate::repository::RecipeRepository;
use crate::session::Session;
use crate::videos::{tutorial_query, VideoSearch};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// What happened to the analytics write for a generation
#[derive(Debug)]
pub enum AnalyticsOutcome {
    Logged,
    /// No authenticated session, or no repository configured
    Skipped,
    Failed(RepositoryError),
}

/// A generated recipe together with its enrichment results
#[derive(Debug)]
pub struct Generation {
    pub recipe: Recipe,
    pub videos: Result<Vec<VideoResult>, VideoSearchError>,
    pub analytics: AnalyticsOutcome,
}

impl Generation {
    /// Videos to display; empty when the search failed
    pub fn videos(&self) -> &[VideoResult] {
        self.videos.as_deref().unwrap_or(&[])
    }
}

pub struct RecipePipeline {
    provider: Box<dyn LlmProvider>,
    videos: Box<dyn VideoSearch>,
    repository: Option<Arc<dyn RecipeRepository>>,
}

impl RecipePipeline {
    pub fn new(
        provider: Box<dyn LlmProvider>,
        videos: Box<dyn VideoSearch>,
        repository: Option<Arc<dyn RecipeRepository>>,
    ) -> Self {
        RecipePipeline {
            provider,
            videos,
            repository,
        }
    }

    /// Creates a new builder for a pipeline
    pub fn builder() -> crate::builder::RecipePipelineBuilder {
        crate::builder::RecipePipelineBuilder::default()
    }

    /// Generate a recipe and enrich it.
    ///
    /// The caller is expected to have rejected blank input already. Errors are
    /// only ever about the recipe itself.
    pub async fn generate(
        &self,
        ingredients: &str,
        session: &Session,
    ) -> Result<Generation, GenerationError> {
        let recipe = self.generate_recipe(ingredients).await?;

        let (analytics, videos) = tokio::join!(
            self.log_generation(ingredients, &recipe.title, session),
            self.find_videos(&recipe.title)
        );

        Ok(Generation {
            recipe,
            videos,
            analytics,
        })
    }

    /// The primary path only: prompt, model call and extraction
    pub async fn generate_recipe(&self, ingredients: &str) -> Result<Recipe, GenerationError> {
        let prompt = build_recipe_prompt(ingredients);
        debug!(
            "Requesting recipe from {} ({})",
            self.provider.provider_name(),
            self.provider.model_name()
        );

        let content = self.provider.complete(&prompt).await?;
        let recipe = extract_recipe(&content)?;
        info!("Generated recipe '{}'", recipe.title);
        Ok(recipe)
    }

    async fn log_generation(
        &self,
        ingredients: &str,
        recipe_title: &str,
        session: &Session,
    ) -> AnalyticsOutcome {
        if !session.is_authenticated() {
            return AnalyticsOutcome::Skipped;
        }
        let (Some(repository), Some(token)) = (&self.repository, session.token()) else {
            return AnalyticsOutcome::Skipped;
        };

        match repository.log_generation(token, ingredients, recipe_title).await {
            Ok(()) => AnalyticsOutcome::Logged,
            Err(e) => {
                warn!("Failed to log recipe generation: {}", e);
                AnalyticsOutcome::Failed(e)
            }
        }
    }

    async fn find_videos(&self, recipe_title: &str) -> Result<Vec<VideoResult>, VideoSearchError> {
        let query = tutorial_query(recipe_title);
        self.videos
            .search(&query)
            .await
            .inspect_err(|e| warn!("Failed to fetch videos: {}", e))
    }
}

/// Hands out request ids so a caller can drop results that are no longer current.
///
/// Nothing is cancelled; an older request simply finishes and its result is
/// ignored by whoever checks [`RequestSequence::is_latest`].
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, id: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_sequence() {
        let requests = RequestSequence::default();
        let first = requests.next();
        let second = requests.next();
        assert!(second > first);
        assert!(!requests.is_latest(first));
        assert!(requests.is_latest(second));
    }

    #[test]
    fn test_generation_videos_empty_on_failure() {
        let generation = Generation {
            recipe: Recipe {
                title: "Toast".to_string(),
                ..Default::default()
            },
            videos: Err(VideoSearchError::Configuration("no key".to_string())),
            analytics: AnalyticsOutcome::Skipped,
        };
        assert!(generation.videos().is_empty());
    }
}
