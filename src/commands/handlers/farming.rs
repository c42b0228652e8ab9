//! Farming command handler
//!
//! Posts the crop watering button. A click replies with the watering time.

use anyhow::Result;
use async_trait::async_trait;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::components::buttons::FARMING_BUTTON_ID;
use crate::core::{ActionRow, ButtonStyle, OutgoingMessage};
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

pub const FARMING_BUTTON_MESSAGE: &str =
    "Shown below is a button which will inform everyone the last time crops were watered";

pub struct CreateBotFarmingButtonCommand;

#[async_trait]
impl SlashCommandHandler for CreateBotFarmingButtonCommand {
    fn name(&self) -> &'static str {
        "create-bot-farming-button"
    }

    fn description(&self) -> &'static str {
        "Post a button to record when crops were last watered"
    }

    async fn execute(
        &self,
        _ctx: &CommandContext,
        _invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let message = OutgoingMessage::public(FARMING_BUTTON_MESSAGE).with_row(ActionRow::button(
            FARMING_BUTTON_ID,
            "Watered crops",
            ButtonStyle::Success,
        ));
        reply.reply(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Component;
    use crate::testing::{harness, invoker, recording_reply, Sent};

    #[tokio::test]
    async fn test_posts_public_farming_button() {
        let harness = harness();
        let (mut reply, log) = recording_reply();

        CreateBotFarmingButtonCommand
            .execute(&harness.context, &invoker(&[]), &ChatCommand::default(), &mut reply)
            .await
            .unwrap();

        let sent = log.sent();
        let Some(Sent::Reply(message)) = sent.first() else {
            panic!("expected a reply, got {sent:?}");
        };
        assert!(!message.ephemeral);
        assert!(matches!(
            message.components[0].components.as_slice(),
            [Component::Button { custom_id, style: ButtonStyle::Success, .. }]
                if custom_id == FARMING_BUTTON_ID
        ));
    }
}
