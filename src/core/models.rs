use serde::Serialize;
use uuid::Uuid;

use crate::errors::NOT_ENOUGH_ARGUMENTS;

/// A slash command as delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    pub correlation_id: String,
    pub command_name: String,
    pub raw_text: String,
}

impl SlashCommand {
    #[must_use]
    pub fn new(command_name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
            command_name: command_name.into(),
            raw_text: raw_text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsRequest {
    #[serde(rename = "number")]
    pub from: String,
    pub to: String,
    pub message: String,
}

/// Which object operation a presigned url grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresignIntent {
    Get,
    Put,
}

impl PresignIntent {
    /// Case-sensitive: only `GET` and `PUT` are accepted.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "GET" => Some(PresignIntent::Get),
            "PUT" => Some(PresignIntent::Put),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignRequest {
    pub filename: String,
    pub intent: PresignIntent,
    pub duration: std::time::Duration,
}

/// Status and body of a backend call, normalized across commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResult {
    pub status_code: u16,
    pub body: String,
}

impl HandlerResult {
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn insufficient_arguments() -> Self {
        Self::new(400, NOT_ENOUGH_ARGUMENTS)
    }

    /// Transport or serialization failure: nothing came back from the backend.
    #[must_use]
    pub fn transport_failure() -> Self {
        Self::new(500, "")
    }

    #[must_use]
    pub fn command_not_found() -> Self {
        Self::new(404, "command not found")
    }
}

/// What the notifier renders for a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure { message: String },
    Info { title: String, text: String },
}

/// Classifies a backend answer by its body alone, after dropping at most one
/// trailing newline:
///
/// - `success` becomes [`Outcome::Success`];
/// - `failed` becomes [`Outcome::Failure`] whose message is `Response: <code>`;
/// - anything else becomes [`Outcome::Info`] titled `Response: <code>` with
///   the untouched body as text.
///
/// The status code never decides the variant.
impl From<HandlerResult> for Outcome {
    fn from(result: HandlerResult) -> Self {
        let marker = result.body.strip_suffix('\n').unwrap_or(&result.body);
        match marker {
            "success" => Outcome::Success,
            "failed" => Outcome::Failure {
                message: format!("Response: {}", result.status_code),
            },
            _ => Outcome::Info {
                title: format!("Response: {}", result.status_code),
                text: result.body,
            },
        }
    }
}
