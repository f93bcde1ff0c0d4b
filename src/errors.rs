use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Missing or invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid command arguments: {0}")]
    ArgumentError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to presign storage request: {0}")]
    StorageError(String),

    #[error("Failed to serialize payload: {0}")]
    SerializationError(String),
}

impl BotError {
    /// The fixed error for a command invoked with too few tokens.
    #[must_use]
    pub fn insufficient_arguments() -> Self {
        BotError::ArgumentError(NOT_ENOUGH_ARGUMENTS.to_string())
    }
}

/// Body shown to the user when a command has too few tokens.
pub const NOT_ENOUGH_ARGUMENTS: &str = "not enough arguments provided";

impl From<SlackClientError> for BotError {
    fn from(error: SlackClientError) -> Self {
        BotError::ApiError(error.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::SerializationError(error.to_string())
    }
}
