//! Utility command handlers
//!
//! Handles: help, check-heartbeat
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Heartbeat reports uptime
//! - 1.0.0: Help and heartbeat commands

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::core::OutgoingMessage;
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

pub const HEARTBEAT_MESSAGE: &str = "The bot is active";

const HELP_TEXT: &str = "**Available commands**\n\
**General**\n\
`/help` - Show this list\n\
`/check-heartbeat` - Check if the bot is active\n\
`/change-bot-username` - Change the bot username (Bot administrator only)\n\
**Faction goals**\n\
`/create-faction-goal` - Create a new faction goal\n\
`/show-faction-goals` - Post every faction goal with update and delete buttons\n\
**Resources and builds**\n\
`/set-faction-resource` - Set the stored amount of a resource\n\
`/show-faction-resources` - List the faction's stored resources\n\
`/save-build` - Save your character build\n\
`/show-builds` - List the faction's saved builds\n\
**Maps and farming**\n\
`/pzfans-map-links` - Pick a PZfans map to get its link\n\
`/create-lootable-areas` - Post every map area with a looted marker\n\
`/create-bot-farming-button` - Post the crop watering button\n\
**Configuration**\n\
`/show-bot-data` - Show the bot channel configuration for this server";

pub struct HelpCommand;

#[async_trait]
impl SlashCommandHandler for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "List the bot commands"
    }

    async fn execute(
        &self,
        _ctx: &CommandContext,
        _invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        reply.reply(OutgoingMessage::ephemeral(HELP_TEXT)).await
    }
}

pub struct HeartbeatCommand;

#[async_trait]
impl SlashCommandHandler for HeartbeatCommand {
    fn name(&self) -> &'static str {
        "check-heartbeat"
    }

    fn description(&self) -> &'static str {
        "Check if the bot is active"
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        _invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let content = format!(
            "{HEARTBEAT_MESSAGE}\n⏱️ Uptime: {}",
            format_uptime(ctx.start_time.elapsed())
        );
        reply.reply(OutgoingMessage::ephemeral(content)).await
    }
}

fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}
