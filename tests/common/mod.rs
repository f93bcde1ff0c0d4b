//! Fakes and fixtures shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use slackbot::clients::{Backend, Presigner};
use slackbot::core::config::AppConfig;
use slackbot::core::models::{HandlerResult, PresignRequest};
use slackbot::errors::BotError;
use slackbot::slack::{Attachment, ChatPoster};

pub fn env_fixture() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("AUTH_TOKEN", "xoxb-test"),
        ("APP_TOKEN", "xapp-test"),
        ("CHANNEL_ID", "C0123456"),
        ("URL", "https://faas.example.com/api/v1/web/ns/"),
        ("SPACES_KEY", "spaces-key"),
        ("SPACES_SECRET", "spaces-secret"),
        ("SPACES_BUCKET", "reports"),
        ("SPACES_REGION", "nyc3"),
    ])
}

pub fn config_from(vars: &HashMap<&'static str, &'static str>) -> Result<AppConfig, BotError> {
    AppConfig::from_lookup(|name| vars.get(name).map(ToString::to_string))
}

pub fn test_config() -> AppConfig {
    config_from(&env_fixture()).unwrap()
}

/// Records every POST and answers with a fixed result.
#[derive(Clone)]
pub struct RecordingBackend {
    pub calls: Arc<Mutex<Vec<(String, Value)>>>,
    response: Result<HandlerResult, String>,
}

impl RecordingBackend {
    pub fn answering(status_code: u16, body: &str) -> Self {
        Self {
            calls: Arc::default(),
            response: Ok(HandlerResult::new(status_code, body)),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            calls: Arc::default(),
            response: Err("connection refused".to_string()),
        }
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    async fn post_json(&self, path: &str, payload: &Value) -> Result<HandlerResult, BotError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), payload.clone()));
        self.response.clone().map_err(BotError::HttpError)
    }
}

/// Returns a deterministic url built from the request.
#[derive(Clone, Default)]
pub struct FakePresigner {
    pub calls: Arc<Mutex<Vec<PresignRequest>>>,
}

#[async_trait]
impl Presigner for FakePresigner {
    async fn presign(&self, request: &PresignRequest) -> Result<String, BotError> {
        self.calls.lock().unwrap().push(request.clone());
        Ok(format!(
            "https://reports.nyc3.digitaloceanspaces.com/{}?X-Amz-Expires={}",
            request.filename,
            request.duration.as_secs()
        ))
    }
}

/// Keeps posted attachments; optionally rejects the first `fail_first` posts.
#[derive(Clone, Default)]
pub struct RecordingPoster {
    pub posts: Arc<Mutex<Vec<(String, Attachment)>>>,
    pub fail_first: Arc<Mutex<usize>>,
}

impl RecordingPoster {
    pub fn failing_first(n: usize) -> Self {
        Self {
            posts: Arc::default(),
            fail_first: Arc::new(Mutex::new(n)),
        }
    }

    pub fn attachments(&self) -> Vec<Attachment> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, a)| a.clone())
            .collect()
    }
}

#[async_trait]
impl ChatPoster for RecordingPoster {
    async fn post_attachment(
        &self,
        channel_id: &str,
        attachment: &Attachment,
    ) -> Result<(), BotError> {
        {
            let mut remaining = self.fail_first.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(BotError::ApiError("channel_not_found".to_string()));
            }
        }
        self.posts
            .lock()
            .unwrap()
            .push((channel_id.to_string(), attachment.clone()));
        Ok(())
    }
}
