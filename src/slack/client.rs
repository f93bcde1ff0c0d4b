//! Slack Web API client used for posting notifications.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::info;

use super::notifier::{Attachment, ChatPoster};
use crate::errors::BotError;

const SLACK_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    ts: Option<String>,
    error: Option<String>,
}

pub struct SlackClient {
    http_client: Client,
    bot_token: String,
    api_base: String,
}

impl SlackClient {
    #[must_use]
    pub fn new(bot_token: &str) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http_client,
            bot_token: bot_token.to_string(),
            api_base: SLACK_API_BASE.to_string(),
        }
    }

    /// Points the client at another Web API root, e.g. a local stub.
    #[must_use]
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ChatPoster for SlackClient {
    async fn post_attachment(
        &self,
        channel_id: &str,
        attachment: &Attachment,
    ) -> Result<(), BotError> {
        let payload = json!({
            "channel": channel_id,
            "attachments": [attachment],
            "as_user": true,
        });

        let resp = self
            .http_client
            .post(format!("{}/chat.postMessage", self.api_base))
            .bearer_auth(&self.bot_token)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(BotError::ApiError(format!(
                "chat.postMessage HTTP {}",
                resp.status()
            )));
        }

        let body: PostMessageResponse = resp.json().await?;
        if !body.ok {
            return Err(BotError::ApiError(format!(
                "chat.postMessage error: {}",
                body.error.as_deref().unwrap_or("unknown")
            )));
        }

        info!(
            "Message successfully sent at {}",
            body.ts.as_deref().unwrap_or("<unknown ts>")
        );
        Ok(())
    }
}
