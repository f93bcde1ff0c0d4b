use std::error::Error;
use slackbot::errors::{BotError, NOT_ENOUGH_ARGUMENTS};

#[test]
fn test_bot_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = BotError::ArgumentError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_bot_error_display() {
    let error = BotError::ApiError("channel_not_found".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access Slack API: channel_not_found"
    );

    let error = BotError::ConfigError("URL: not set".to_string());
    assert_eq!(
        format!("{error}"),
        "Missing or invalid configuration: URL: not set"
    );

    let error = BotError::StorageError("expiry too long".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to presign storage request: expiry too long"
    );
}

#[test]
fn test_insufficient_arguments_carries_fixed_message() {
    match BotError::insufficient_arguments() {
        BotError::ArgumentError(msg) => assert_eq!(msg, NOT_ENOUGH_ARGUMENTS),
        other => panic!("Unexpected error type: {other:?}"),
    }
    assert_eq!(NOT_ENOUGH_ARGUMENTS, "not enough arguments provided");
}

#[test]
fn test_bot_error_from_conversions() {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let bot_err: BotError = err.into();
    assert!(matches!(bot_err, BotError::SerializationError(_)));

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> BotError {
        BotError::from(err)
    }
}
