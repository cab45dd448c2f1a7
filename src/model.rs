use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A recipe as produced by the language model.
///
/// Only `title` is required to be non-empty; see [`Recipe::is_valid`]. List
/// items are kept exactly as decoded, so an ingredient may be an object or a
/// number as well as a string. Any extra fields the model adds are kept in
/// `extra` so that serializing an extracted recipe reproduces what was decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients_needed: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<CookTime>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Text for one ingredient or step: strings as they are, anything else as JSON
pub fn item_text(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Free-form cooking time. The model may answer `"15"` or `15`; neither is coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CookTime {
    Text(String),
    Minutes(serde_json::Number),
}

impl fmt::Display for CookTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookTime::Text(text) => write!(f, "{}", text),
            CookTime::Minutes(minutes) => write!(f, "{}", minutes),
        }
    }
}

/// A video tutorial found for a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub channel_title: String,
    pub url: String,
}

impl VideoResult {
    /// Watch URL for a video id
    pub fn watch_url(id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", id)
    }
}

/// Video reference stored alongside a saved recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeLink {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumbnail: String,
}

impl From<&VideoResult> for YoutubeLink {
    fn from(video: &VideoResult) -> Self {
        YoutubeLink {
            title: video.title.clone(),
            url: video.url.clone(),
            thumbnail: video.thumbnail.clone(),
        }
    }
}

/// Payload sent to the backend when the user saves a generated recipe.
///
/// Field names follow the backend: `ingredients_needed` becomes `ingredients`,
/// `steps` becomes `instructions` and `time_minutes` becomes `cookTime`.
/// List items that are not strings are sent as their JSON text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cook_time: String,
    pub servings: String,
    pub youtube_links: Vec<YoutubeLink>,
}

impl NewRecipe {
    pub fn from_generation(recipe: &Recipe, videos: &[VideoResult]) -> Self {
        NewRecipe {
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            ingredients: recipe.ingredients_needed.iter().map(item_text).collect(),
            instructions: recipe.steps.iter().map(item_text).collect(),
            cook_time: recipe
                .time_minutes
                .as_ref()
                .map(|time| time.to_string())
                .unwrap_or_default(),
            servings: String::new(),
            youtube_links: videos.iter().map(YoutubeLink::from).collect(),
        }
    }
}

/// A recipe owned by the backend repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cook_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub servings: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub youtube_links: Vec<YoutubeLink>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One recorded recipe generation, as returned by the analytics endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationLogEntry {
    /// `None` when the backend stored no input
    #[serde(default, alias = "ingredientsInput")]
    pub ingredients_input: Option<String>,
    #[serde(default, alias = "recipeTitle", deserialize_with = "null_as_default")]
    pub recipe_title: String,
    #[serde(default, alias = "generatedAt")]
    pub generated_at: Option<String>,
}

impl GenerationLogEntry {
    /// Parsed `generated_at`; `None` when missing or not RFC 3339
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.generated_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc))
    }
}

/// Account returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(
        rename = "fullName",
        alias = "full_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Partial profile update; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Dashboard aggregate computed by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub generations_count: u64,
    #[serde(default)]
    pub recipes_count: u64,
}

impl DashboardStats {
    /// Percentage of generations that were saved, rounded; 0 without generations
    pub fn save_rate(&self) -> u64 {
        if self.generations_count == 0 {
            return 0;
        }
        (self.recipes_count as f64 / self.generations_count as f64 * 100.0).round() as u64
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}
