use tracing::warn;

use super::args::rest;
use super::forward;
use crate::clients::Backend;
use crate::clients::backend::EMAIL_PATH;
use crate::core::models::{EmailRequest, HandlerResult};
use crate::errors::BotError;

/// `from to subject message...`
pub const MIN_ARGS: usize = 4;

/// # Errors
///
/// Returns `BotError::ArgumentError` if fewer than [`MIN_ARGS`] tokens are given.
pub fn build_request(tokens: &[String]) -> Result<EmailRequest, BotError> {
    match tokens {
        [from, to, subject, _, ..] => Ok(EmailRequest {
            from: from.clone(),
            to: to.clone(),
            subject: subject.clone(),
            message: rest(tokens, 3),
        }),
        _ => Err(BotError::insufficient_arguments()),
    }
}

pub async fn handle(backend: &dyn Backend, tokens: &[String]) -> HandlerResult {
    let request = match build_request(tokens) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected email command with {} tokens: {}", tokens.len(), e);
            return HandlerResult::insufficient_arguments();
        }
    };

    forward(backend, EMAIL_PATH, &request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::backend::MockBackend;
    use crate::commands::args::parse_args;

    #[test]
    fn test_build_request_splits_fields() {
        let tokens = parse_args("a@x.com b@y.com Hello world this is a test");
        let request = build_request(&tokens).unwrap();
        assert_eq!(
            request,
            EmailRequest {
                from: "a@x.com".to_string(),
                to: "b@y.com".to_string(),
                subject: "Hello".to_string(),
                message: "world this is a test".to_string(),
            }
        );
    }

    #[test]
    fn test_build_request_requires_four_tokens() {
        let tokens = parse_args("a@x.com b@y.com Hello");
        assert!(matches!(
            build_request(&tokens),
            Err(BotError::ArgumentError(_))
        ));
    }

    #[tokio::test]
    async fn test_handle_posts_json_and_relays_response() {
        let mut backend = MockBackend::new();
        backend
            .expect_post_json()
            .withf(|path, payload| {
                path == EMAIL_PATH
                    && payload["from"] == "a@x.com"
                    && payload["to"] == "b@y.com"
                    && payload["subject"] == "Hello"
                    && payload["message"] == "world"
            })
            .times(1)
            .returning(|_, _| Ok(HandlerResult::new(202, "queued")));

        let result = handle(&backend, &parse_args("a@x.com b@y.com Hello world")).await;
        assert_eq!(result, HandlerResult::new(202, "queued"));
    }

    #[tokio::test]
    async fn test_handle_short_input_never_calls_backend() {
        let mut backend = MockBackend::new();
        backend.expect_post_json().times(0);

        let result = handle(&backend, &parse_args("a@x.com b@y.com")).await;
        assert_eq!(result, HandlerResult::insufficient_arguments());
    }

    #[tokio::test]
    async fn test_handle_maps_transport_error_to_500() {
        let mut backend = MockBackend::new();
        backend
            .expect_post_json()
            .returning(|_, _| Err(BotError::HttpError("connection refused".to_string())));

        let result = handle(&backend, &parse_args("a b c d")).await;
        assert_eq!(result, HandlerResult::new(500, ""));
    }
}
