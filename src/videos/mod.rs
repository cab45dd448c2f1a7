mod youtube;

pub use youtube::YouTubeSearch;

use crate::error::VideoSearchError;
use crate::model::VideoResult;
use async_trait::async_trait;

/// Terms appended to a recipe title to find cooking tutorials
pub const QUERY_SUFFIX: &str = "recipe cooking tutorial";

/// Videos requested per recipe
pub const MAX_VIDEOS: u32 = 3;

/// Search query for a recipe title
pub fn tutorial_query(recipe_title: &str) -> String {
    format!("{} {}", recipe_title, QUERY_SUFFIX)
}

/// A video search service
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Find at most [`MAX_VIDEOS`] videos matching `query`
    async fn search(&self, query: &str) -> Result<Vec<VideoResult>, VideoSearchError>;
}
