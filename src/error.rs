use thiserror::Error;

/// Errors on the primary recipe generation path.
///
/// The `Display` output of every variant is meant to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// No credential configured for the language model service
    #[error("{0}")]
    Configuration(String),

    /// The language model service answered with a non-success status
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The request never produced a usable HTTP response
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered but carried no text
    #[error("No recipe generated")]
    EmptyResponse,

    /// The text could not be turned into a recipe
    #[error("Failed to parse recipe: {0}")]
    MalformedResponse(String),
}

/// Errors from the video search service. These never reach the user directly.
#[derive(Error, Debug)]
pub enum VideoSearchError {
    #[error("{0}")]
    Configuration(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected video search response: {0}")]
    MalformedResponse(String),
}

/// Errors from the backend repository service
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Non-success response; `message` is the backend's own text or a per-operation fallback
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from backend: {0}")]
    Decode(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// Errors while establishing or tearing down a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Pull a service's own error message out of a response body.
///
/// `pointer` is a JSON pointer such as `/error/message`. Falls back to
/// `fallback` when the body is not JSON or the message is missing or empty.
pub(crate) fn service_message(body: &str, pointer: &str, fallback: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.pointer(pointer).and_then(|m| m.as_str()).map(String::from))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_passthrough() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(
            service_message(body, "/error/message", "Failed to generate recipe"),
            "Invalid API Key"
        );
    }

    #[test]
    fn test_service_message_fallback() {
        assert_eq!(service_message("", "/message", "Failed to save recipe"), "Failed to save recipe");
        assert_eq!(
            service_message(r#"{"error": "quota"}"#, "/error/message", "Failed to fetch videos"),
            "Failed to fetch videos"
        );
        assert_eq!(service_message(r#"{"message": ""}"#, "/message", "fallback"), "fallback");
    }

    #[test]
    fn test_upstream_display_is_message_only() {
        let err = GenerationError::Upstream {
            status: 401,
            message: "Invalid API Key".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid API Key");
    }
}
