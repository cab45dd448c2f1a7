use log::debug;
use recipe_finder::model::item_text;
use recipe_finder::{
    AnalyticsOutcome, BackendClient, FileTokenStore, RecipePipeline, Session, Settings,
};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Ingredients are everything after the program name, e.g. `eggs, flour, milk`
    let ingredients = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if ingredients.trim().is_empty() {
        return Err("Please enter some ingredients".into());
    }

    let settings = Settings::load()?;
    let backend = Arc::new(BackendClient::new(reqwest::Client::new(), &settings.backend));
    let store = Arc::new(FileTokenStore::new(settings.session.token_file.clone()));
    let session = Session::hydrate(store, backend.as_ref()).await?;

    let pipeline = RecipePipeline::builder()
        .settings(settings)
        .repository(backend)
        .build()?;

    let generation = pipeline.generate(ingredients.trim(), &session).await?;
    let recipe = &generation.recipe;

    println!("{}", recipe.title);
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }
    if let Some(time) = &recipe.time_minutes {
        println!("Time: {} minutes", time);
    }
    if !recipe.difficulty.is_empty() {
        println!("Difficulty: {}", recipe.difficulty);
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients_needed {
        println!("  - {}", item_text(ingredient));
    }

    println!("\nSteps:");
    for (number, step) in recipe.steps.iter().enumerate() {
        println!("  {}. {}", number + 1, item_text(step));
    }

    println!("\nVideo tutorials:");
    if generation.videos().is_empty() {
        println!("  No videos found");
    }
    for video in generation.videos() {
        println!("  {} ({}) {}", video.title, video.channel_title, video.url);
    }

    if let AnalyticsOutcome::Failed(e) = &generation.analytics {
        debug!("Generation was not logged: {}", e);
    }

    Ok(())
}
