use crate::config::BackendConfig;
use crate::error::{service_message, RepositoryError};
use crate::model::{
    DashboardStats, GenerationLogEntry, NewRecipe, ProfileUpdate, SavedRecipe, User,
};
use crate::repository::{AuthApi, AuthGrant, RecipeRepository};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

/// HTTP client for the backend REST API
pub struct BackendClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct RecipeEnvelope {
    recipe: SavedRecipe,
}

#[derive(Deserialize)]
struct RecipesEnvelope {
    #[serde(default)]
    recipes: Option<Vec<SavedRecipe>>,
}

#[derive(Deserialize)]
struct AnalyticsEnvelope {
    #[serde(default)]
    analytics: Option<Vec<GenerationLogEntry>>,
}

#[derive(Deserialize)]
struct StatsEnvelope {
    stats: DashboardStats,
}

impl BackendClient {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        BackendClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        BackendClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// `/api/recipes/{id}[/{action}]` with the id encoded as a single path segment
    fn recipe_url(&self, recipe_id: &str, action: Option<&str>) -> Result<Url, RepositoryError> {
        let mut url = Url::parse(&self.url("/recipes"))
            .map_err(|e| RepositoryError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| RepositoryError::InvalidUrl(self.base_url.clone()))?
            .push(recipe_id)
            .extend(action);
        Ok(url)
    }

    /// Send a request and return the body of a successful response.
    ///
    /// Non-success responses become [`RepositoryError::Api`] carrying the
    /// backend's `message`, or `fallback` when there is none.
    async fn execute(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<String, RepositoryError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!("Backend answered {}: {}", status, body);
            return Err(RepositoryError::Api {
                status: status.as_u16(),
                message: service_message(&body, "/message", fallback),
            });
        }

        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, RepositoryError> {
        let body = self.execute(request, fallback).await?;
        serde_json::from_str(&body).map_err(|e| RepositoryError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AuthApi for BackendClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthGrant, RepositoryError> {
        let request = self.client.post(self.url("/auth/signup")).json(&json!({
            "email": email,
            "password": password,
            "fullName": full_name
        }));
        self.fetch(request, "Signup failed").await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, RepositoryError> {
        let request = self.client.post(self.url("/auth/signin")).json(&json!({
            "email": email,
            "password": password
        }));
        self.fetch(request, "Signin failed").await
    }

    async fn profile(&self, token: &str) -> Result<User, RepositoryError> {
        let request = self.client.get(self.url("/auth/profile")).bearer_auth(token);
        let envelope: UserEnvelope = self.fetch(request, "Failed to fetch profile").await?;
        Ok(envelope.user)
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, RepositoryError> {
        let request = self
            .client
            .put(self.url("/auth/profile"))
            .bearer_auth(token)
            .json(update);
        let envelope: UserEnvelope = self.fetch(request, "Profile update failed").await?;
        Ok(envelope.user)
    }
}

#[async_trait]
impl RecipeRepository for BackendClient {
    async fn save_recipe(
        &self,
        token: &str,
        recipe: &NewRecipe,
    ) -> Result<SavedRecipe, RepositoryError> {
        let request = self
            .client
            .post(self.url("/recipes/save"))
            .bearer_auth(token)
            .json(recipe);
        let envelope: RecipeEnvelope = self.fetch(request, "Failed to save recipe").await?;
        Ok(envelope.recipe)
    }

    async fn saved_recipes(&self, token: &str) -> Result<Vec<SavedRecipe>, RepositoryError> {
        let request = self.client.get(self.url("/recipes/saved")).bearer_auth(token);
        let envelope: RecipesEnvelope = self.fetch(request, "Failed to fetch recipes").await?;
        Ok(envelope.recipes.unwrap_or_default())
    }

    async fn delete_recipe(&self, token: &str, recipe_id: &str) -> Result<(), RepositoryError> {
        let request = self
            .client
            .delete(self.recipe_url(recipe_id, None)?)
            .bearer_auth(token);
        self.execute(request, "Failed to delete recipe").await?;
        Ok(())
    }

    async fn toggle_favorite(
        &self,
        token: &str,
        recipe_id: &str,
    ) -> Result<SavedRecipe, RepositoryError> {
        let request = self
            .client
            .patch(self.recipe_url(recipe_id, Some("favorite"))?)
            .bearer_auth(token);
        let envelope: RecipeEnvelope = self.fetch(request, "Failed to toggle favorite").await?;
        Ok(envelope.recipe)
    }

    async fn log_generation(
        &self,
        token: &str,
        ingredients: &str,
        recipe_title: &str,
    ) -> Result<(), RepositoryError> {
        let request = self
            .client
            .post(self.url("/recipes/log"))
            .bearer_auth(token)
            .json(&json!({
                "ingredients": ingredients,
                "recipeTitle": recipe_title
            }));
        self.execute(request, "Failed to log").await?;
        Ok(())
    }

    async fn analytics(&self, token: &str) -> Result<Vec<GenerationLogEntry>, RepositoryError> {
        let request = self
            .client
            .get(self.url("/recipes/analytics"))
            .bearer_auth(token);
        let envelope: AnalyticsEnvelope = self.fetch(request, "Failed to fetch analytics").await?;
        Ok(envelope.analytics.unwrap_or_default())
    }

    async fn dashboard_stats(&self, token: &str) -> Result<DashboardStats, RepositoryError> {
        let request = self.client.get(self.url("/recipes/stats")).bearer_auth(token);
        let envelope: StatsEnvelope = self.fetch(request, "Failed to fetch stats").await?;
        Ok(envelope.stats)
    }
}
