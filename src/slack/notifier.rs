//! Turns a command [`Outcome`] into a colored Slack attachment and posts it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::core::config::AppConfig;
use crate::core::models::Outcome;
use crate::errors::BotError;

pub const INFO_COLOR: &str = "#0069ff";
pub const SUCCESS_COLOR: &str = "#93c572";
pub const ERROR_COLOR: &str = "#ba2507";

pub const SUCCESS_TITLE: &str = "MESSAGE SENT!";
pub const ERROR_TITLE: &str = "ERROR!";

/// `01-02-2006 3:4:5 MST`: unpadded 12-hour clock and a zone abbreviation.
const FOOTER_TIME_FORMAT: &str = "%m-%d-%Y %-I:%-M:%-S %Z";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
}

/// A legacy Slack message attachment with a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub color: String,
    pub fields: Vec<AttachmentField>,
    pub footer: String,
}

/// Anything that can put an attachment into a channel.
#[async_trait]
pub trait ChatPoster: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the platform rejects or never receives the post.
    async fn post_attachment(&self, channel_id: &str, attachment: &Attachment)
    -> Result<(), BotError>;
}

#[must_use]
pub fn footer_text(label: &str, now: &DateTime<Tz>) -> String {
    format!("{} | {}", label, now.format(FOOTER_TIME_FORMAT))
}

/// Picks color and field for an outcome. The text of an info outcome is
/// passed through unchanged.
#[must_use]
pub fn render(outcome: &Outcome, footer: String) -> Attachment {
    let (color, title, value) = match outcome {
        Outcome::Success => (SUCCESS_COLOR, SUCCESS_TITLE.to_string(), String::new()),
        Outcome::Failure { message } => (ERROR_COLOR, ERROR_TITLE.to_string(), message.clone()),
        Outcome::Info { title, text } => (INFO_COLOR, title.clone(), text.clone()),
    };

    Attachment {
        color: color.to_string(),
        fields: vec![AttachmentField { title, value }],
        footer,
    }
}

pub struct Notifier {
    poster: Box<dyn ChatPoster>,
    channel_id: String,
    footer_label: String,
    timezone: Tz,
}

impl Notifier {
    #[must_use]
    pub fn new(poster: Box<dyn ChatPoster>, config: &AppConfig) -> Self {
        Self {
            poster,
            channel_id: config.channel_id.clone(),
            footer_label: config.footer_label.clone(),
            timezone: config.footer_timezone,
        }
    }

    /// Posts exactly one attachment describing `outcome`.
    ///
    /// # Errors
    ///
    /// Propagates the poster's error; nothing is retried.
    pub async fn notify(&self, outcome: &Outcome) -> Result<(), BotError> {
        let now = Utc::now().with_timezone(&self.timezone);
        let attachment = render(outcome, footer_text(&self.footer_label, &now));
        self.poster
            .post_attachment(&self.channel_id, &attachment)
            .await
    }
}
