use tracing::warn;

use super::args::rest;
use super::forward;
use crate::clients::Backend;
use crate::clients::backend::SMS_PATH;
use crate::core::models::{HandlerResult, SmsRequest};
use crate::errors::BotError;

/// `from to message...`
pub const MIN_ARGS: usize = 3;

/// # Errors
///
/// Returns `BotError::ArgumentError` if fewer than [`MIN_ARGS`] tokens are given.
pub fn build_request(tokens: &[String]) -> Result<SmsRequest, BotError> {
    match tokens {
        [from, to, _, ..] => Ok(SmsRequest {
            from: from.clone(),
            to: to.clone(),
            message: rest(tokens, 2),
        }),
        _ => Err(BotError::insufficient_arguments()),
    }
}

pub async fn handle(backend: &dyn Backend, tokens: &[String]) -> HandlerResult {
    let request = match build_request(tokens) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected sms command with {} tokens: {}", tokens.len(), e);
            return HandlerResult::insufficient_arguments();
        }
    };

    forward(backend, SMS_PATH, &request).await
}
