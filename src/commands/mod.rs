//! Slash command handlers and the table that routes names to them.

pub mod args;
pub mod duration;
pub mod email;
pub mod sms;
pub mod url;

use serde::Serialize;
use tracing::{error, warn};

use crate::clients::Backend;
use crate::core::config::CommandNames;
use crate::core::models::HandlerResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Email,
    Sms,
    Url,
}

/// Maps configured slash command names to handlers.
#[derive(Debug, Clone)]
pub struct CommandTable {
    names: CommandNames,
}

impl CommandTable {
    #[must_use]
    pub fn new(names: CommandNames) -> Self {
        Self { names }
    }

    /// Exact, case-sensitive match against the configured names.
    #[must_use]
    pub fn resolve(&self, command_name: &str) -> Option<CommandKind> {
        if command_name == self.names.email {
            Some(CommandKind::Email)
        } else if command_name == self.names.sms {
            Some(CommandKind::Sms)
        } else if command_name == self.names.url {
            Some(CommandKind::Url)
        } else {
            None
        }
    }
}

/// Serializes `request` and POSTs it, folding every failure into a 500.
pub(crate) async fn forward<T: Serialize + Sync>(
    backend: &dyn Backend,
    path: &str,
    request: &T,
) -> HandlerResult {
    let payload = match serde_json::to_value(request) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Failed to serialize payload for {}: {}", path, e);
            return HandlerResult::transport_failure();
        }
    };

    match backend.post_json(path, &payload).await {
        Ok(result) => {
            if !(200..300).contains(&result.status_code) {
                warn!(
                    path,
                    status_code = result.status_code,
                    body_len = result.body.len(),
                    "Backend answered with a non-success status"
                );
            }
            result
        }
        Err(e) => {
            error!("Backend call to {} failed: {}", path, e);
            HandlerResult::transport_failure()
        }
    }
}
