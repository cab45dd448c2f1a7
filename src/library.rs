//! Local view of the user's saved recipes.
//!
//! The backend owns every saved recipe. After each successful call the local
//! list is patched with whatever the backend returned rather than re-fetched.

use crate::error::RepositoryError;
use crate::model::{NewRecipe, SavedRecipe};
use crate::pipeline::Generation;
use crate::repository::RecipeRepository;
use crate::session::Session;
use log::info;

#[derive(Debug, Default)]
pub struct RecipeLibrary {
    recipes: Vec<SavedRecipe>,
}

impl RecipeLibrary {
    /// Fetch the signed-in user's saved recipes
    pub async fn load(
        repository: &dyn RecipeRepository,
        session: &Session,
    ) -> Result<Self, RepositoryError> {
        let recipes = repository.saved_recipes(session.require_token()?).await?;
        Ok(RecipeLibrary { recipes })
    }

    pub fn recipes(&self) -> &[SavedRecipe] {
        &self.recipes
    }

    pub fn favorites(&self) -> impl Iterator<Item = &SavedRecipe> {
        self.recipes.iter().filter(|recipe| recipe.is_favorite)
    }

    pub fn get(&self, recipe_id: &str) -> Option<&SavedRecipe> {
        self.recipes.iter().find(|recipe| recipe.id == recipe_id)
    }

    /// Save a generated recipe with its videos
    pub async fn save(
        &mut self,
        repository: &dyn RecipeRepository,
        session: &Session,
        generation: &Generation,
    ) -> Result<&SavedRecipe, RepositoryError> {
        let payload = NewRecipe::from_generation(&generation.recipe, generation.videos());
        let saved = repository
            .save_recipe(session.require_token()?, &payload)
            .await?;
        info!(
            "Saved recipe '{}' with {} video reference(s)",
            saved.title,
            saved.youtube_links.len()
        );
        self.recipes.push(saved);
        Ok(&self.recipes[self.recipes.len() - 1])
    }

    pub async fn delete(
        &mut self,
        repository: &dyn RecipeRepository,
        session: &Session,
        recipe_id: &str,
    ) -> Result<(), RepositoryError> {
        repository
            .delete_recipe(session.require_token()?, recipe_id)
            .await?;
        self.recipes.retain(|recipe| recipe.id != recipe_id);
        Ok(())
    }

    /// Toggle the favorite flag and replace the local copy with the backend's
    pub async fn toggle_favorite(
        &mut self,
        repository: &dyn RecipeRepository,
        session: &Session,
        recipe_id: &str,
    ) -> Result<&SavedRecipe, RepositoryError> {
        let updated = repository
            .toggle_favorite(session.require_token()?, recipe_id)
            .await?;
        Ok(self.replace(updated))
    }

    fn replace(&mut self, updated: SavedRecipe) -> &SavedRecipe {
        match self.recipes.iter().position(|recipe| recipe.id == updated.id) {
            Some(index) => {
                self.recipes[index] = updated;
                &self.recipes[index]
            }
            None => {
                self.recipes.push(updated);
                &self.recipes[self.recipes.len() - 1]
            }
        }
    }
}
