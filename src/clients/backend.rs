//! HTTP backend that actually delivers email and SMS.
//!
//! The bot only forwards a JSON payload and relays whatever the backend
//! answers; status and body come back untouched.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::core::models::HandlerResult;
use crate::errors::BotError;

/// Path of the email function, relative to the backend base url.
pub const EMAIL_PATH: &str = "/sendgrid-email/sample/emails";

/// Path of the SMS function, relative to the backend base url.
pub const SMS_PATH: &str = "/twilio-sms/sample/sms";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// POSTs `payload` to `path` and returns the backend's status and body.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response could be obtained at all.
    async fn post_json(&self, path: &str, payload: &Value) -> Result<HandlerResult, BotError>;
}

pub struct HttpBackend {
    http_client: Client,
    base_url: String,
}

impl HttpBackend {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn post_json(&self, path: &str, payload: &Value) -> Result<HandlerResult, BotError> {
        let url = self.endpoint(path);
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .http_client
            .post(&url)
            .headers(headers)
            .body(serde_json::to_vec(payload)?)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!("Backend {} answered {}", url, status);

        Ok(HandlerResult::new(status.as_u16(), body))
    }
}
