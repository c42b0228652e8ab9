//! Button click handler

use anyhow::Result;
use log::info;

use super::modals;
use super::routes::{resolve, Route, RouteMatch};
use crate::commands::context::CommandContext;
use crate::core::{BotError, ComponentKind, OutgoingMessage};
use crate::features::looted::{mark_looted, timestamp_token};
use crate::interaction::{ButtonClick, Response};

pub const FARMING_BUTTON_ID: &str = "farming_button";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Farming,
    MarkLooted,
    UpdateGoal,
    DeleteGoal,
    UpdateBotData,
}

pub const BUTTON_ROUTES: &[Route<ButtonAction>] = &[
    Route::exact(FARMING_BUTTON_ID, ButtonAction::Farming),
    Route::prefix("mark_looted_", ButtonAction::MarkLooted),
    Route::prefix("update_goal_", ButtonAction::UpdateGoal),
    Route::prefix("delete_goal_", ButtonAction::DeleteGoal),
    Route::prefix("update_bot_data_", ButtonAction::UpdateBotData),
];

/// Resolve a click to its response; `now` is the current unix time in seconds
pub async fn handle_button(
    ctx: &CommandContext,
    click: &ButtonClick,
    now: i64,
) -> Result<Response> {
    let (action, suffix) = match resolve(BUTTON_ROUTES, &click.custom_id) {
        RouteMatch::Handled { action, suffix } => (action, suffix),
        RouteMatch::FallThrough => {
            return Err(BotError::UnknownInteractionIdentifier {
                kind: ComponentKind::Button,
                custom_id: click.custom_id.clone(),
            }
            .into())
        }
    };

    match action {
        ButtonAction::Farming => Ok(Response::Message(OutgoingMessage::ephemeral(format!(
            "The crops were last watered on {}",
            timestamp_token(now)
        )))),
        ButtonAction::MarkLooted => {
            info!("Area {suffix} marked as looted");
            Ok(Response::UpdateMessage(mark_looted(&click.message_content, now)))
        }
        ButtonAction::UpdateGoal => {
            match ctx.repository.goals.get(&ctx.faction_id, suffix).await? {
                Some(goal) => Ok(Response::Modal(modals::update_goal_modal(&goal))),
                None => Ok(Response::Message(OutgoingMessage::ephemeral(format!(
                    "The goal **{suffix}** does not exist."
                )))),
            }
        }
        ButtonAction::DeleteGoal => Ok(Response::Modal(modals::delete_goal_modal(suffix))),
        ButtonAction::UpdateBotData => {
            let document = ctx.repository.bot_data.find_by_id(suffix).await?;
            Ok(Response::Modal(modals::bot_data_modal(suffix, document.as_ref())))
        }
    }
}
