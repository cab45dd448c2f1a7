use crate::config::VideoConfig;
use crate::error::{service_message, VideoSearchError};
use crate::model::VideoResult;
use crate::videos::{VideoSearch, MAX_VIDEOS};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

/// YouTube Data API search
pub struct YouTubeSearch {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    channel_title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    high: Thumbnail,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl From<SearchItem> for VideoResult {
    fn from(item: SearchItem) -> Self {
        VideoResult {
            url: VideoResult::watch_url(&item.id.video_id),
            id: item.id.video_id,
            title: item.snippet.title,
            thumbnail: item.snippet.thumbnails.high.url,
            channel_title: item.snippet.channel_title,
        }
    }
}

impl YouTubeSearch {
    pub fn new(client: Client, config: &VideoConfig, api_key: Option<String>) -> Self {
        YouTubeSearch {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        YouTubeSearch {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearch {
    async fn search(&self, query: &str) -> Result<Vec<VideoResult>, VideoSearchError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            VideoSearchError::Configuration(
                "Video search API key is not configured. Set RECIPE_FINDER__VIDEOS__API_KEY or YOUTUBE_API_KEY."
                    .to_string(),
            )
        })?;

        let max_results = MAX_VIDEOS.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!("Video search answered {}: {}", status, body);
            return Err(VideoSearchError::Upstream {
                status: status.as_u16(),
                message: service_message(&body, "/error/message", "Failed to fetch videos"),
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| VideoSearchError::MalformedResponse(e.to_string()))?;

        Ok(parsed.items.into_iter().map(VideoResult::from).collect())
    }
}
