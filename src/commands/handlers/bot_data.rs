//! Bot channel data command handler

use anyhow::Result;
use async_trait::async_trait;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::core::OutgoingMessage;
use crate::features::BotEvent;
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

pub const BOT_DATA_PENDING_MESSAGE: &str = "Bot channel data will be showed shortly";
pub const GUILD_ONLY_MESSAGE: &str = "This command can only be used in a server.";

pub struct ShowBotDataCommand;

#[async_trait]
impl SlashCommandHandler for ShowBotDataCommand {
    fn name(&self) -> &'static str {
        "show-bot-data"
    }

    fn description(&self) -> &'static str {
        "Show the bot channel configuration for this server"
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let Some(guild_id) = invoker.guild_id.clone() else {
            return reply.reply(OutgoingMessage::ephemeral(GUILD_ONLY_MESSAGE)).await;
        };

        let published = ctx.events.publish(BotEvent::ShowBotChannelData {
            channel_id: invoker.channel_id.clone(),
            guild_id,
        });
        if !published {
            anyhow::bail!("the event listener is not running");
        }

        reply
            .reply(OutgoingMessage::ephemeral(BOT_DATA_PENDING_MESSAGE))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{harness, invoker, recording_reply, Sent, CHANNEL_ID, GUILD_ID};

    #[tokio::test]
    async fn test_publishes_guild_event() {
        let harness = harness();
        let mut events = harness.context.events.subscribe();
        let (mut reply, log) = recording_reply();

        ShowBotDataCommand
            .execute(&harness.context, &invoker(&[]), &ChatCommand::default(), &mut reply)
            .await
            .unwrap();

        assert_eq!(
            events.try_recv().unwrap(),
            BotEvent::ShowBotChannelData {
                channel_id: CHANNEL_ID.to_string(),
                guild_id: GUILD_ID.to_string(),
            }
        );
        assert_eq!(
            log.sent(),
            vec![Sent::Reply(OutgoingMessage::ephemeral(BOT_DATA_PENDING_MESSAGE))]
        );
    }

    #[tokio::test]
    async fn test_direct_message_is_refused() {
        let harness = harness();
        let mut events = harness.context.events.subscribe();
        let (mut reply, log) = recording_reply();
        let mut dm_invoker = invoker(&[]);
        dm_invoker.guild_id = None;

        ShowBotDataCommand
            .execute(&harness.context, &dm_invoker, &ChatCommand::default(), &mut reply)
            .await
            .unwrap();

        assert!(events.try_recv().is_err());
        assert_eq!(
            log.sent(),
            vec![Sent::Reply(OutgoingMessage::ephemeral(GUILD_ONLY_MESSAGE))]
        );
    }
}
