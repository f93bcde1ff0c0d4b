use std::env;
use std::fmt;

use chrono_tz::Tz;

use crate::errors::BotError;

pub const DEFAULT_EMAIL_COMMAND: &str = "/emails";
pub const DEFAULT_SMS_COMMAND: &str = "/sms";
pub const DEFAULT_URL_COMMAND: &str = "/url";
pub const DEFAULT_FOOTER_LABEL: &str = "DigitalOcean";

/// Object storage settings used by the presigned-url command.
#[derive(Clone)]
pub struct StorageConfig {
    pub key: String,
    pub secret: String,
    pub bucket: String,
    pub region: String,
    pub endpoint: String,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("key", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Slash command names the bot answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNames {
    pub email: String,
    pub sms: String,
    pub url: String,
}

impl Default for CommandNames {
    fn default() -> Self {
        Self {
            email: DEFAULT_EMAIL_COMMAND.to_string(),
            sms: DEFAULT_SMS_COMMAND.to_string(),
            url: DEFAULT_URL_COMMAND.to_string(),
        }
    }
}

/// Process configuration, read once at startup and never mutated.
#[derive(Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_app_token: String,
    pub channel_id: String,
    pub backend_url: String,
    pub storage: StorageConfig,
    pub commands: CommandNames,
    pub footer_label: String,
    pub footer_timezone: Tz,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("slack_bot_token", &"<redacted>")
            .field("slack_app_token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .field("backend_url", &self.backend_url)
            .field("storage", &self.storage)
            .field("commands", &self.commands)
            .field("footer_label", &self.footer_label)
            .field("footer_timezone", &self.footer_timezone)
            .finish()
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` naming the first required variable that
    /// is missing or empty, or an optional one that cannot be parsed.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String, BotError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                Some(_) => Err(BotError::ConfigError(format!("{name}: value is empty"))),
                None => Err(BotError::ConfigError(format!("{name}: not set"))),
            }
        };
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let region = required("SPACES_REGION")?;
        let endpoint = optional("SPACES_ENDPOINT")
            .unwrap_or_else(|| format!("https://{region}.digitaloceanspaces.com"));

        // An explicit FOOTER_TIMEZONE must parse; the process TZ is only a hint.
        let footer_timezone = match optional("FOOTER_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|e| BotError::ConfigError(format!("FOOTER_TIMEZONE: {e}")))?,
            None => optional("TZ")
                .and_then(|name| name.trim_start_matches(':').parse::<Tz>().ok())
                .unwrap_or(Tz::UTC),
        };

        let defaults = CommandNames::default();

        Ok(Self {
            slack_bot_token: required("AUTH_TOKEN")?,
            slack_app_token: required("APP_TOKEN")?,
            channel_id: required("CHANNEL_ID")?,
            backend_url: required("URL")?.trim_end_matches('/').to_string(),
            storage: StorageConfig {
                key: required("SPACES_KEY")?,
                secret: required("SPACES_SECRET")?,
                bucket: required("SPACES_BUCKET")?,
                region,
                endpoint,
            },
            commands: CommandNames {
                email: optional("EMAIL_COMMAND").unwrap_or(defaults.email),
                sms: optional("SMS_COMMAND").unwrap_or(defaults.sms),
                url: optional("URL_COMMAND").unwrap_or(defaults.url),
            },
            footer_label: optional("FOOTER_LABEL")
                .unwrap_or_else(|| DEFAULT_FOOTER_LABEL.to_string()),
            footer_timezone,
        })
    }
}
