//! Turn a list of ingredients into a recipe with a language model, then look
//! up video tutorials for it and record the generation for analytics.
//!
//! # Example
//! ```no_run
//! use recipe_finder::{RecipePipeline, Session};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = RecipePipeline::builder().api_key("gsk_your_key").build()?;
//! let generation = pipeline
//!     .generate("eggs, flour, milk", &Session::anonymous())
//!     .await?;
//! println!("{}", generation.recipe.title);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod library;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod repository;
pub mod session;
pub mod videos;

pub use analytics::{aggregate, AnalyticsSummary};
pub use builder::RecipePipelineBuilder;
pub use config::Settings;
pub use error::{GenerationError, RepositoryError, SessionError, VideoSearchError};
pub use library::RecipeLibrary;
pub use model::{
    CookTime, DashboardStats, GenerationLogEntry, NewRecipe, ProfileUpdate, Recipe, SavedRecipe,
    User, VideoResult,
};
pub use pipeline::{AnalyticsOutcome, Generation, RecipePipeline, RequestSequence};
pub use repository::{AuthApi, BackendClient, RecipeRepository};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};

/// Generate a recipe with settings from the config file and environment.
///
/// Only the recipe is returned; no video search or analytics happen.
///
/// # Example
/// ```no_run
/// use recipe_finder::generate_recipe;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = generate_recipe("chicken, rice, garlic").await?;
/// println!("{} ({})", recipe.title, recipe.difficulty);
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe(ingredients: &str) -> Result<Recipe, GenerationError> {
    let settings =
        Settings::load().map_err(|e| GenerationError::Configuration(e.to_string()))?;
    RecipePipeline::builder()
        .settings(settings)
        .build()?
        .generate_recipe(ingredients)
        .await
}
