//! # Interaction Dispatcher
//!
//! Routes one inbound interaction to its slash command or pattern handler
//! and owns failure containment: an error escaping a handler becomes exactly
//! one ephemeral message to the user, sent as a reply or a follow-up
//! depending on what the interaction has already received.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Request ids on every log line
//! - 1.0.0: Command, button, form and select menu routing

use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::auth::{is_authorized, unauthorized_message};
use super::context::CommandContext;
use super::registry::CommandRegistry;
use crate::components::{handle_button, handle_form, handle_select};
use crate::core::{BotError, OutgoingMessage};
use crate::interaction::{
    ChatCommand, InboundEvent, Interaction, InteractionReply, Invoker, ReplyState,
};

pub const COMMAND_NOT_FOUND_MESSAGE: &str =
    "The command you have used does not exist. Please try again or use another command";

const UNKNOWN_COMPONENT_MESSAGE: &str =
    "This interaction is not supported anymore. Please try again or use another command";

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    context: Arc<CommandContext>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, context: CommandContext) -> Self {
        Self {
            registry: Arc::new(registry),
            context: Arc::new(context),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Handle one interaction to completion; never returns an error
    pub async fn dispatch(&self, event: InboundEvent, reply: &mut InteractionReply) {
        let request_id = Uuid::new_v4();
        let InboundEvent {
            invoker,
            interaction,
        } = event;
        let kind = interaction.kind_name();
        let identifier = interaction.identifier().to_string();

        info!(
            "[{request_id}] {kind} `{identifier}` from {} ({})",
            invoker.username, invoker.user_id
        );

        let result = self.route(request_id, &invoker, interaction, reply).await;

        match result {
            Ok(()) => debug!("[{request_id}] {kind} `{identifier}` completed"),
            Err(e) => {
                let defect = e
                    .downcast_ref::<BotError>()
                    .is_some_and(BotError::is_programming_defect);
                if defect {
                    error!("[{request_id}] {kind} `{identifier}` hit a wiring defect: {e:#}");
                } else {
                    error!("[{request_id}] {kind} `{identifier}` failed: {e:#}");
                }
                report_failure(request_id, &e, reply).await;
            }
        }
    }

    async fn route(
        &self,
        request_id: Uuid,
        invoker: &Invoker,
        interaction: Interaction,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        match interaction {
            Interaction::ChatCommand(command) => {
                self.run_command(request_id, invoker, &command, reply).await
            }
            Interaction::Button(click) => {
                let response = handle_button(&self.context, &click, now).await?;
                reply.respond(response).await
            }
            Interaction::SelectMenu(selection) => {
                let response = handle_select(&self.context, &selection).await?;
                reply.respond(response).await
            }
            Interaction::ModalSubmit(form) => {
                let response = handle_form(&self.context, &form).await?;
                reply.respond(response).await
            }
        }
    }

    async fn run_command(
        &self,
        request_id: Uuid,
        invoker: &Invoker,
        command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let Some(handler) = self.registry.get(&command.name) else {
            warn!("[{request_id}] Unknown command /{}", command.name);
            return reply
                .reply(OutgoingMessage::ephemeral(COMMAND_NOT_FOUND_MESSAGE))
                .await;
        };

        let required = handler.required_roles();
        if !is_authorized(&invoker.roles, required) {
            warn!(
                "[{request_id}] {} denied /{}: requires {:?}",
                invoker.username, command.name, required
            );
            return reply
                .reply(OutgoingMessage::ephemeral(unauthorized_message(required)))
                .await;
        }

        handler.execute(&self.context, invoker, command, reply).await
    }
}

/// User-facing text for a handler failure
pub fn failure_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<BotError>() {
        Some(BotError::UnknownInteractionIdentifier { .. }) => {
            UNKNOWN_COMPONENT_MESSAGE.to_string()
        }
        _ => format!(
            "There was an error while executing this command. Please inform the bot developer: {error}"
        ),
    }
}

/// Send one error message, choosing reply or follow-up from the reply state
async fn report_failure(request_id: Uuid, error: &anyhow::Error, reply: &mut InteractionReply) {
    let message = OutgoingMessage::ephemeral(failure_message(error));
    let sent = match reply.state() {
        ReplyState::Unanswered => reply.reply(message).await,
        ReplyState::Replied | ReplyState::Deferred => reply.follow_up(message).await,
        ReplyState::ModalShown => {
            warn!("[{request_id}] Form already shown; the error was not reported to the user");
            return;
        }
    };
    if let Err(e) = sent {
        error!("[{request_id}] Failed to report the error to the user: {e:#}");
    }
}
