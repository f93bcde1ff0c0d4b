//! The dispatch loop: one slash command at a time, parse → handle → notify.
//!
//! Commands arrive already acknowledged on an unbounded queue fed by the
//! Socket Mode listener. The loop waits for the next command or for
//! cancellation; once a command is taken off the queue it runs to completion,
//! and every path ends in exactly one notification attempt.

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::clients::{Backend, Presigner};
use crate::commands::{self, CommandKind, CommandTable, args::parse_args};
use crate::core::models::{HandlerResult, Outcome, SlashCommand};
use crate::slack::Notifier;

pub struct Dispatcher {
    commands: CommandTable,
    backend: Box<dyn Backend>,
    presigner: Box<dyn Presigner>,
    notifier: Notifier,
}

impl Dispatcher {
    #[must_use]
    pub fn new(
        commands: CommandTable,
        backend: Box<dyn Backend>,
        presigner: Box<dyn Presigner>,
        notifier: Notifier,
    ) -> Self {
        Self {
            commands,
            backend,
            presigner,
            notifier,
        }
    }

    /// Runs the matching handler. Unknown names skip parsing entirely.
    pub async fn handle(&self, command: &SlashCommand) -> Outcome {
        let Some(kind) = self.commands.resolve(&command.command_name) else {
            warn!("Unrecognized command {}", command.command_name);
            return HandlerResult::command_not_found().into();
        };

        let tokens = parse_args(&command.raw_text);
        match kind {
            CommandKind::Email => commands::email::handle(self.backend.as_ref(), &tokens)
                .await
                .into(),
            CommandKind::Sms => commands::sms::handle(self.backend.as_ref(), &tokens)
                .await
                .into(),
            CommandKind::Url => commands::url::handle(self.presigner.as_ref(), &tokens).await,
        }
    }

    /// Handles one command and posts its result. Never fails: a rejected
    /// post is logged and the command is done.
    #[tracing::instrument(
        level = "info",
        name = "slash_command",
        skip(self, command),
        fields(correlation_id = %command.correlation_id, command = %command.command_name)
    )]
    pub async fn process(&self, command: SlashCommand) {
        let outcome = self.handle(&command).await;
        if let Err(e) = self.notifier.notify(&outcome).await {
            error!("Error sending slack attachment: {}", e);
        }
    }

    /// Drains `events` until `cancel` fires or every sender is gone.
    ///
    /// Cancellation is only observed between commands.
    pub async fn run(&self, mut events: UnboundedReceiver<SlashCommand>, cancel: CancellationToken) {
        info!("Dispatcher waiting for slash commands");
        loop {
            let command = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!("Shutdown requested, dispatcher exiting");
                    break;
                }
                next = events.recv() => match next {
                    Some(command) => command,
                    None => {
                        info!("Command queue closed, dispatcher exiting");
                        break;
                    }
                },
            };

            self.process(command).await;
        }
    }
}
