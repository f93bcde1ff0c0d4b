/// Slackbot - routes Slack slash commands to email, SMS and presigned-url
/// handlers and posts each result back to a channel.
///
/// # Architecture
///
/// The system uses:
/// - slack-morphism Socket Mode for receiving and acknowledging commands
/// - an HTTP backend (reqwest) that delivers email and SMS
/// - the AWS S3 SDK to presign object urls against DigitalOcean Spaces
/// - the Slack Web API for posting colored result attachments
/// - Tokio for the async runtime
///
/// # Example
///
/// ```no_run
/// use slackbot::core::config::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     slackbot::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let cancel = tokio_util::sync::CancellationToken::new();
///     slackbot::run(config, cancel).await?;
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod clients;
pub mod commands;
pub mod core;
pub mod dispatch;
pub mod errors;
pub mod slack;

pub use dispatch::Dispatcher;
pub use errors::BotError;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::clients::{HttpBackend, SpacesPresigner};
use crate::commands::CommandTable;
use crate::core::config::AppConfig;
use crate::slack::{Notifier, SlackClient};

/// Configure structured JSON logging, filtered by `RUST_LOG` (default `info`).
///
/// # Example
///
/// ```
/// slackbot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().json().with_target(true);

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Selects aws-lc-rs as the process-wide TLS crypto provider.
///
/// aws-sdk-s3 and slack-morphism enable different rustls backends, so rustls
/// cannot choose one on its own and panics when the first TLS client is built.
/// Must run before any connector is created; later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}

/// Wires the real collaborators together and runs until `cancel` fires.
///
/// The Socket Mode listener runs on its own task; the dispatch loop runs on
/// the caller's task.
///
/// # Errors
///
/// Returns an error if the Socket Mode listener cannot connect or its task
/// dies.
pub async fn run(config: AppConfig, cancel: CancellationToken) -> Result<(), BotError> {
    install_crypto_provider();
    let (tx, rx) = mpsc::unbounded_channel();

    let listener_cancel = cancel.clone();
    let app_token = config.slack_app_token.clone();
    let listener = tokio::spawn(async move {
        slack::run_listener(&app_token, tx, listener_cancel).await
    });

    let dispatcher = Dispatcher::new(
        CommandTable::new(config.commands.clone()),
        Box::new(HttpBackend::new(&config.backend_url)),
        Box::new(SpacesPresigner::new(&config.storage).await),
        Notifier::new(Box::new(SlackClient::new(&config.slack_bot_token)), &config),
    );
    info!(commands = ?config.commands, "Dispatcher ready");

    // The queue closes when the listener stops, so this also returns then.
    dispatcher.run(rx, cancel.clone()).await;
    cancel.cancel();

    match listener.await {
        Ok(result) => result,
        Err(e) => {
            error!("Listener task failed: {}", e);
            Err(BotError::ApiError(format!("listener task failed: {e}")))
        }
    }
}
