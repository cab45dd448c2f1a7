use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level settings for the recipe finder
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Language model service
    #[serde(default)]
    pub llm: LlmConfig,
    /// Video search service
    #[serde(default)]
    pub videos: VideoConfig,
    /// Backend repository service
    #[serde(default)]
    pub backend: BackendConfig,
    /// Where the bearer token is persisted between runs
    #[serde(default)]
    pub session: SessionConfig,
    /// Optional HTTP timeout in seconds. Unset means the client default.
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// Configuration for the chat-completions endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// API key (falls back to `GROQ_API_KEY`)
    pub api_key: Option<String>,
    /// Base URL, without the `/v1/chat/completions` suffix
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_model(),
        }
    }
}

/// Configuration for the video search endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct VideoConfig {
    /// API key (falls back to `YOUTUBE_API_KEY`)
    pub api_key: Option<String>,
    #[serde(default = "default_video_base_url")]
    pub base_url: String,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_video_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
        }
    }
}

// Default value functions
fn default_llm_base_url() -> String {
    "https://api.groq.com/openai".to_string()
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_video_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_token_file() -> PathBuf {
    PathBuf::from(".recipe-finder/token")
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__LLM__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_settings()
    }

    /// Language model key from settings, then `GROQ_API_KEY`
    pub fn llm_api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Video search key from settings, then `YOUTUBE_API_KEY`
    pub fn video_api_key(&self) -> Option<String> {
        self.videos
            .api_key
            .clone()
            .or_else(|| std::env::var("YOUTUBE_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Load settings from `config.toml` (optional) and `RECIPE_FINDER__*` variables
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_FINDER__VIDEOS__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
