//! Socket Mode connection to Slack.
//!
//! The listener owns the WebSocket (connect, reconnect, heartbeats). Slash
//! commands are acknowledged as soon as they are queued for the dispatcher,
//! well inside Slack's three second window; handling happens later, on the
//! dispatch task.

use std::sync::Arc;

use slack_morphism::prelude::*;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::models::SlashCommand;
use crate::errors::BotError;

/// State shared with the Socket Mode callbacks.
#[derive(Clone)]
struct ListenerState {
    commands: UnboundedSender<SlashCommand>,
}

fn socket_mode_error_handler(
    err: Box<dyn std::error::Error + Send + Sync>,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> HttpStatusCode {
    warn!(error = %err, "Socket Mode error");
    HttpStatusCode::OK
}

/// Queues the command and acks with an empty body; the result is posted to
/// the notification channel once the dispatcher gets to it.
async fn on_command_event(
    event: SlackCommandEvent,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> Result<SlackCommandEventResponse, Box<dyn std::error::Error + Send + Sync>> {
    let sender = {
        let guard = states.read().await;
        guard
            .get_user_state::<ListenerState>()
            .map(|state| state.commands.clone())
            .ok_or("Missing listener state")?
    };

    let command = SlashCommand::new(event.command.0, event.text.unwrap_or_default());
    debug!(
        correlation_id = %command.correlation_id,
        command = %command.command_name,
        "Acknowledging slash command"
    );

    if let Err(e) = sender.send(command) {
        warn!(
            correlation_id = %e.0.correlation_id,
            "Dispatcher is gone, dropping slash command"
        );
    }

    Ok(SlackCommandEventResponse::new(SlackMessageContent::new()))
}

async fn on_push_event(
    _event: SlackPushEventCallback,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    debug!("Ignoring non-command event");
    Ok(())
}

/// Connects with the app-level token and feeds slash commands into
/// `commands` until `cancel` fires or the connection gives up.
///
/// # Errors
///
/// Returns an error if the HTTP connector cannot be built or the initial
/// Socket Mode handshake fails.
pub async fn run_listener(
    app_token: &str,
    commands: UnboundedSender<SlashCommand>,
    cancel: CancellationToken,
) -> Result<(), BotError> {
    crate::install_crypto_provider();
    let connector = SlackClientHyperConnector::new()
        .map_err(|e| BotError::ApiError(format!("Failed to create Slack connector: {e}")))?;
    let client = Arc::new(slack_morphism::SlackClient::new(connector));

    let listener_environment = Arc::new(
        SlackClientEventsListenerEnvironment::new(client)
            .with_error_handler(socket_mode_error_handler)
            .with_user_state(ListenerState { commands }),
    );

    let callbacks = SlackSocketModeListenerCallbacks::new()
        .with_command_events(on_command_event)
        .with_push_events(on_push_event);

    let listener = SlackClientSocketModeListener::new(
        &SlackClientSocketModeConfig::new(),
        listener_environment,
        callbacks,
    );

    let app_token = SlackApiToken::new(SlackApiTokenValue::new(app_token.to_string()));
    listener.listen_for(&app_token).await?;
    info!("Socket Mode connected");

    tokio::select! {
        exit_code = listener.serve() => {
            info!(exit_code, "Socket Mode listener stopped");
        }
        () = cancel.cancelled() => {
            info!("Socket Mode shutting down");
            listener.shutdown().await;
        }
    }

    Ok(())
}
