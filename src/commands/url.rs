use tracing::{error, warn};

use super::duration::parse_duration;
use crate::clients::Presigner;
use crate::core::models::{Outcome, PresignIntent, PresignRequest};
use crate::errors::BotError;

/// `filename GET|PUT duration`
pub const MIN_ARGS: usize = 3;

/// Title of the attachment carrying a presigned url.
pub const PRESIGNED_URL_TITLE: &str = "Presigned url:";

/// Validates the tokens before anything is signed.
///
/// Only the first three tokens are read; extra tokens are ignored.
///
/// # Errors
///
/// Returns `BotError::ArgumentError` for too few tokens, an intent other than
/// `GET`/`PUT`, or a duration that is unparsable or negative.
pub fn build_request(tokens: &[String]) -> Result<PresignRequest, BotError> {
    let [filename, intent, duration, ..] = tokens else {
        return Err(BotError::insufficient_arguments());
    };

    let intent = PresignIntent::parse(intent).ok_or_else(|| {
        BotError::ArgumentError(format!("invalid request type `{intent}`, expected GET or PUT"))
    })?;
    let duration = parse_duration(duration)?;

    Ok(PresignRequest {
        filename: filename.clone(),
        intent,
        duration,
    })
}

pub async fn handle(presigner: &dyn Presigner, tokens: &[String]) -> Outcome {
    let request = match build_request(tokens) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected url command: {}", e);
            return Outcome::Failure {
                message: e.to_string(),
            };
        }
    };

    match presigner.presign(&request).await {
        Ok(url) if !url.is_empty() => Outcome::Info {
            title: PRESIGNED_URL_TITLE.to_string(),
            text: url,
        },
        Ok(_) => {
            error!("Presigner returned an empty url for {}", request.filename);
            Outcome::Failure {
                message: "failed to generate presigned url".to_string(),
            }
        }
        Err(e) => {
            error!("Failed to presign {}: {}", request.filename, e);
            Outcome::Failure {
                message: e.to_string(),
            }
        }
    }
}
