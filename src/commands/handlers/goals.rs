//! Faction goal command handlers
//!
//! Handles: create-faction-goal, show-faction-goals
//!
//! Creation goes through the `create_faction_goal_modal` form. Showing the
//! goals is handed to the event listener, which posts one message per goal
//! into the invoking channel.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::components::modals;
use crate::core::OutgoingMessage;
use crate::features::BotEvent;
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

pub const GOALS_PENDING_MESSAGE: &str = "Faction goals will be showed shortly";

pub struct CreateFactionGoalCommand;

#[async_trait]
impl SlashCommandHandler for CreateFactionGoalCommand {
    fn name(&self) -> &'static str {
        "create-faction-goal"
    }

    fn description(&self) -> &'static str {
        "Create a new faction goal"
    }

    async fn execute(
        &self,
        _ctx: &CommandContext,
        _invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        reply.show_modal(modals::create_goal_modal()).await
    }
}

pub struct ShowFactionGoalsCommand;

#[async_trait]
impl SlashCommandHandler for ShowFactionGoalsCommand {
    fn name(&self) -> &'static str {
        "show-faction-goals"
    }

    fn description(&self) -> &'static str {
        "Show every faction goal in this channel"
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let published = ctx.events.publish(BotEvent::ShowFactionGoals {
            channel_id: invoker.channel_id.clone(),
            faction_id: ctx.faction_id.clone(),
        });
        if !published {
            anyhow::bail!("the event listener is not running");
        }

        info!("Faction goals requested in channel {}", invoker.channel_id);
        reply
            .reply(OutgoingMessage::ephemeral(GOALS_PENDING_MESSAGE))
            .await
    }
}
