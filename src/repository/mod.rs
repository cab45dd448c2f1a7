//! The backend service that owns accounts, saved recipes and generation logs.
//!
//! Nothing here is implemented locally; the traits describe the REST contract
//! and [`BackendClient`] speaks it over HTTP.

mod backend;

pub use backend::BackendClient;

use crate::error::RepositoryError;
use crate::model::{
    DashboardStats, GenerationLogEntry, NewRecipe, ProfileUpdate, SavedRecipe, User,
};
use async_trait::async_trait;
use serde::Deserialize;

/// A freshly issued bearer token and the account it belongs to
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthGrant {
    pub user: User,
    pub token: String,
}

/// Account endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthGrant, RepositoryError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, RepositoryError>;

    /// Resolve a token to its account; also how a stored token is validated
    async fn profile(&self, token: &str) -> Result<User, RepositoryError>;

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, RepositoryError>;
}

/// Saved recipes and analytics, always on behalf of a token holder
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn save_recipe(
        &self,
        token: &str,
        recipe: &NewRecipe,
    ) -> Result<SavedRecipe, RepositoryError>;

    async fn saved_recipes(&self, token: &str) -> Result<Vec<SavedRecipe>, RepositoryError>;

    async fn delete_recipe(&self, token: &str, recipe_id: &str) -> Result<(), RepositoryError>;

    /// Flip `isFavorite` and return the updated recipe
    async fn toggle_favorite(
        &self,
        token: &str,
        recipe_id: &str,
    ) -> Result<SavedRecipe, RepositoryError>;

    /// Record one generation for analytics
    async fn log_generation(
        &self,
        token: &str,
        ingredients: &str,
        recipe_title: &str,
    ) -> Result<(), RepositoryError>;

    async fn analytics(&self, token: &str) -> Result<Vec<GenerationLogEntry>, RepositoryError>;

    async fn dashboard_stats(&self, token: &str) -> Result<DashboardStats, RepositoryError>;
}
