//! Forms presented by commands and buttons
//!
//! Input ids here are the field names the form handler reads back.

use crate::core::{InputStyle, Modal, TextInput};
use crate::database::{BotDataDocument, FactionGoal};

pub const CREATE_GOAL_MODAL_ID: &str = "create_faction_goal_modal";
pub const GOAL_NAME_INPUT: &str = "faction_goal_name";
pub const GOAL_DESCRIPTION_INPUT: &str = "faction_goal_description";
pub const GOAL_STATUS_INPUT: &str = "faction_goal_status";

pub const UPDATE_DESCRIPTION_INPUT: &str = "goal_description";
pub const UPDATE_STATUS_INPUT: &str = "goal_status";

pub const DELETE_CONFIRMATION_INPUT: &str = "delete_confirmation";

/// Channel inputs of the bot data form, in display order
pub const BOT_DATA_INPUTS: [(&str, &str); 5] = [
    ("discord_faction_goals_channel_id", "Faction goals channel id"),
    ("discord_resource_storage_channel_id", "Resource storage channel id"),
    ("discord_pzfans_maps_channel_id", "PZfans maps channel id"),
    ("discord_farming_channel_id", "Farming channel id"),
    ("discord_areas_looted_channel_id", "Areas looted channel id"),
];

/// Discord limits modal titles and input labels to 45 characters
const MAX_TITLE: usize = 45;

fn clip_title(title: String) -> String {
    if title.chars().count() <= MAX_TITLE {
        return title;
    }
    let mut clipped: String = title.chars().take(MAX_TITLE - 3).collect();
    clipped.push_str("...");
    clipped
}

pub fn create_goal_modal() -> Modal {
    Modal::new(CREATE_GOAL_MODAL_ID, "Create faction goal below:")
        .input(
            TextInput::new(
                GOAL_NAME_INPUT,
                "(Required) Goal (1 - 25 characters)",
                InputStyle::Short,
            )
                .required(true)
                .length(Some(1), Some(25))
                .placeholder("(Example) land claim cost"),
        )
        .input(
            TextInput::new(
                GOAL_DESCRIPTION_INPUT,
                "(Optional) Description (0 - 500 characters)",
                InputStyle::Paragraph,
            )
            .length(None, Some(500))
            .placeholder("(Example) cost to buy a land claim"),
        )
        .input(
            TextInput::new(
                GOAL_STATUS_INPUT,
                "(Optional) Status (0-25 characters)",
                InputStyle::Short,
            )
                .length(None, Some(25))
                .placeholder("(Example) In progress"),
        )
}

pub fn update_goal_modal(goal: &FactionGoal) -> Modal {
    Modal::new(
        format!("update_goal_modal_{}", goal.goal_name),
        clip_title(format!("Update Goal: {}", goal.goal_name)),
    )
    .input(
        TextInput::new(UPDATE_DESCRIPTION_INPUT, "Description", InputStyle::Paragraph)
            .placeholder("Enter new goal description")
            .value(goal.description.clone().unwrap_or_default())
            .length(None, Some(500)),
    )
    .input(
        TextInput::new(UPDATE_STATUS_INPUT, "Status", InputStyle::Short)
            .placeholder("Enter new status (pending, in progress, completed, TBA)")
            .value(goal.status.as_str())
            .required(true)
            .length(None, Some(25)),
    )
}

pub fn delete_goal_modal(goal_name: &str) -> Modal {
    Modal::new(
        format!("confirm_delete_goal_{goal_name}"),
        "Confirm Goal Deletion?",
    )
    .input(
        TextInput::new(
            DELETE_CONFIRMATION_INPUT,
            clip_title(format!("Type \"{goal_name}\" to confirm")),
            InputStyle::Short,
        )
        .placeholder(goal_name),
    )
}

/// Bot data form for a guild, pre-filled from the stored document if any
pub fn bot_data_modal(guild_id: &str, document: Option<&BotDataDocument>) -> Modal {
    let current = document.map(|document| document.channels());
    BOT_DATA_INPUTS
        .iter()
        .enumerate()
        .fold(
            Modal::new(
                format!("update_bot_data_modal_{guild_id}"),
                "Update bot channel data",
            ),
            |modal, (index, (input_id, label))| {
                let value = current
                    .as_ref()
                    .and_then(|channels| channels[index].1)
                    .unwrap_or_default();
                modal.input(
                    TextInput::new(*input_id, *label, InputStyle::Short)
                        .placeholder("Channel id, leave blank to keep")
                        .value(value)
                        .length(None, Some(20)),
                )
            },
        )
}
