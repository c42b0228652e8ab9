//! Faction resource command handlers
//!
//! Handles: set-faction-resource, show-faction-resources
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandOption, SlashCommandHandler};
use crate::core::{BotError, OutgoingMessage};
use crate::database::FactionResources;
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

pub const RESOURCE_OPTION: &str = "resource";
pub const AMOUNT_OPTION: &str = "amount";

pub const NO_RESOURCES_MESSAGE: &str = "No resources have been recorded for this faction yet.";

pub struct SetFactionResourceCommand;

#[async_trait]
impl SlashCommandHandler for SetFactionResourceCommand {
    fn name(&self) -> &'static str {
        "set-faction-resource"
    }

    fn description(&self) -> &'static str {
        "Set the stored amount of a faction resource"
    }

    fn options(&self) -> &'static [CommandOption] {
        const OPTIONS: &[CommandOption] = &[
            CommandOption::string(RESOURCE_OPTION, "Resource name", true),
            CommandOption::integer(AMOUNT_OPTION, "Amount in storage", true),
        ];
        OPTIONS
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        invoker: &Invoker,
        command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let resource = command
            .string(RESOURCE_OPTION)
            .map(str::trim)
            .filter(|resource| !resource.is_empty())
            .ok_or_else(|| BotError::MissingOption(RESOURCE_OPTION.to_string()))?;
        let amount = command
            .integer(AMOUNT_OPTION)
            .ok_or_else(|| BotError::MissingOption(AMOUNT_OPTION.to_string()))?;

        if amount < 0 {
            return reply
                .reply(OutgoingMessage::ephemeral("The amount cannot be negative."))
                .await;
        }

        ctx.repository
            .resources
            .set_amount(&ctx.faction_id, resource, amount)
            .await?;
        info!(
            "Resource {} set to {} by {} ({})",
            resource, amount, invoker.username, invoker.user_id
        );

        reply
            .reply(OutgoingMessage::ephemeral(format!(
                "**{resource}** is now set to {amount}."
            )))
            .await
    }
}

pub struct ShowFactionResourcesCommand;

#[async_trait]
impl SlashCommandHandler for ShowFactionResourcesCommand {
    fn name(&self) -> &'static str {
        "show-faction-resources"
    }

    fn description(&self) -> &'static str {
        "List the faction's stored resources"
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        _invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let resources = ctx.repository.resources.get(&ctx.faction_id).await?;
        reply
            .reply(OutgoingMessage::ephemeral(resources_listing(resources.as_ref())))
            .await
    }
}

fn resources_listing(resources: Option<&FactionResources>) -> String {
    match resources {
        Some(resources) if !resources.resources.is_empty() => {
            let mut listing = String::from("**Faction resources**\n");
            for (name, amount) in &resources.resources {
                listing.push_str(&format!("{name}: {amount}\n"));
            }
            listing
        }
        _ => NO_RESOURCES_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::OptionValue;
    use crate::testing::{harness, invoker, recording_reply, Sent, FACTION_ID};

    fn set_command(resource: &str, amount: i64) -> ChatCommand {
        let mut command = ChatCommand {
            name: "set-faction-resource".to_string(),
            ..ChatCommand::default()
        };
        command.options.insert(
            RESOURCE_OPTION.to_string(),
            OptionValue::String(resource.to_string()),
        );
        command
            .options
            .insert(AMOUNT_OPTION.to_string(), OptionValue::Integer(amount));
        command
    }

    #[tokio::test]
    async fn test_set_then_show() {
        let harness = harness();

        for (resource, amount) in [("nails", 120), ("planks", 40), ("nails", 95)] {
            let (mut reply, _log) = recording_reply();
            SetFactionResourceCommand
                .execute(
                    &harness.context,
                    &invoker(&[]),
                    &set_command(resource, amount),
                    &mut reply,
                )
                .await
                .unwrap();
        }

        let stored = harness
            .context
            .repository
            .resources
            .get(FACTION_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.resources.get("nails"), Some(&95));
        assert_eq!(stored.resources.get("planks"), Some(&40));

        let (mut reply, log) = recording_reply();
        ShowFactionResourcesCommand
            .execute(&harness.context, &invoker(&[]), &ChatCommand::default(), &mut reply)
            .await
            .unwrap();
        assert_eq!(
            log.sent(),
            vec![Sent::Reply(OutgoingMessage::ephemeral(
                "**Faction resources**\nnails: 95\nplanks: 40\n"
            ))]
        );
    }

    #[tokio::test]
    async fn test_negative_amount_is_not_stored() {
        let harness = harness();
        let (mut reply, _log) = recording_reply();

        SetFactionResourceCommand
            .execute(&harness.context, &invoker(&[]), &set_command("nails", -1), &mut reply)
            .await
            .unwrap();

        assert_eq!(harness.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_missing_amount_is_an_error() {
        let harness = harness();
        let (mut reply, log) = recording_reply();
        let mut command = set_command("nails", 1);
        command.options.remove(AMOUNT_OPTION);

        let error = SetFactionResourceCommand
            .execute(&harness.context, &invoker(&[]), &command, &mut reply)
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<BotError>(),
            Some(BotError::MissingOption(name)) if name == AMOUNT_OPTION
        ));
        assert!(log.sent().is_empty());
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(resources_listing(None), NO_RESOURCES_MESSAGE);
        let empty = FactionResources {
            faction_id: "kush".to_string(),
            ..FactionResources::default()
        };
        assert_eq!(resources_listing(Some(&empty)), NO_RESOURCES_MESSAGE);
    }
}
