//! Map command handlers
//!
//! Handles: pzfans-map-links, create-lootable-areas
//!
//! Both read the map catalog fresh on every call.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Map selector menu and lootable area posts

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::components::select_menus::MAP_SELECTOR_MENU_ID;
use crate::core::{ActionRow, ButtonStyle, OutgoingMessage};
use crate::features::MapCatalog;
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

pub const NO_MAPS_MESSAGE: &str = "No maps are configured.";

pub struct PzfansMapLinksCommand;

#[async_trait]
impl SlashCommandHandler for PzfansMapLinksCommand {
    fn name(&self) -> &'static str {
        "pzfans-map-links"
    }

    fn description(&self) -> &'static str {
        "Pick a PZfans map to get its link"
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        _invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let entries = ctx.maps.load().await?;
        if entries.is_empty() {
            return reply.reply(OutgoingMessage::ephemeral(NO_MAPS_MESSAGE)).await;
        }

        let message = OutgoingMessage::ephemeral("Please select a map:").with_row(
            ActionRow::select_menu(
                MAP_SELECTOR_MENU_ID,
                "Select a map",
                MapCatalog::menu_options(&entries),
            ),
        );
        reply.reply(message).await
    }
}

pub struct CreateLootableAreasCommand;

#[async_trait]
impl SlashCommandHandler for CreateLootableAreasCommand {
    fn name(&self) -> &'static str {
        "create-lootable-areas"
    }

    fn description(&self) -> &'static str {
        "Post every map area with a button to mark it as looted"
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let entries = ctx.maps.load().await?;
        if entries.is_empty() {
            return reply.reply(OutgoingMessage::ephemeral(NO_MAPS_MESSAGE)).await;
        }

        // One post per area can take longer than the initial response window
        reply.defer(true).await?;
        for entry in &entries {
            let post = OutgoingMessage::public(entry.lootable_area_post()).with_row(
                ActionRow::button(
                    format!("mark_looted_{}", entry.id),
                    "Mark as looted",
                    ButtonStyle::Primary,
                ),
            );
            ctx.gateway.send_message(&invoker.channel_id, &post).await?;
        }

        info!(
            "🗺️ Posted {} lootable areas to channel {}",
            entries.len(),
            invoker.channel_id
        );
        reply
            .edit_reply(&format!("Posted {} lootable areas.", entries.len()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Component;
    use crate::testing::{harness, invoker, recording_reply, Sent, CHANNEL_ID};

    #[tokio::test]
    async fn test_map_links_menu_uses_indices() {
        let harness = harness();
        let (mut reply, log) = recording_reply();

        PzfansMapLinksCommand
            .execute(&harness.context, &invoker(&[]), &ChatCommand::default(), &mut reply)
            .await
            .unwrap();

        let sent = log.sent();
        let Some(Sent::Reply(message)) = sent.first() else {
            panic!("expected a reply, got {sent:?}");
        };
        assert!(message.ephemeral);
        match message.components[0].components.as_slice() {
            [Component::SelectMenu {
                custom_id, options, ..
            }] => {
                assert_eq!(custom_id, MAP_SELECTOR_MENU_ID);
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                assert_eq!(values, vec!["0", "1", "2"]);
                assert_eq!(options[1].label, "West Point");
            }
            other => panic!("unexpected components: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_reply() {
        let mut harness = harness();
        harness.context.maps = MapCatalog::inline(Vec::new());
        let (mut reply, log) = recording_reply();

        PzfansMapLinksCommand
            .execute(&harness.context, &invoker(&[]), &ChatCommand::default(), &mut reply)
            .await
            .unwrap();

        assert_eq!(
            log.sent(),
            vec![Sent::Reply(OutgoingMessage::ephemeral(NO_MAPS_MESSAGE))]
        );
    }

    #[tokio::test]
    async fn test_lootable_areas_post_one_message_per_area() {
        let harness = harness();
        let (mut reply, log) = recording_reply();

        CreateLootableAreasCommand
            .execute(&harness.context, &invoker(&[]), &ChatCommand::default(), &mut reply)
            .await
            .unwrap();

        let posts = harness.gateway.messages();
        assert_eq!(posts.len(), 3);
        for (index, (channel_id, post)) in posts.iter().enumerate() {
            assert_eq!(channel_id, CHANNEL_ID);
            assert!(post.content.contains("Last looted: N/A"));
            assert!(matches!(
                post.components[0].components.as_slice(),
                [Component::Button { custom_id, .. }]
                    if *custom_id == format!("mark_looted_{}", index + 1)
            ));
        }

        assert_eq!(
            log.sent(),
            vec![
                Sent::Defer { ephemeral: true },
                Sent::EditReply("Posted 3 lootable areas.".to_string())
            ]
        );
    }
}
