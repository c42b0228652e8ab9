//! Modal submission handler
//!
//! Every accepted submission performs one repository write and produces one
//! reply. Validation problems (a missing goal name, an unknown status, a
//! malformed channel id, a confirmation mismatch) are answered without
//! writing anything.

use anyhow::Result;
use log::info;

use super::modals::{
    BOT_DATA_INPUTS, DELETE_CONFIRMATION_INPUT, GOAL_DESCRIPTION_INPUT, GOAL_NAME_INPUT,
    GOAL_STATUS_INPUT, UPDATE_DESCRIPTION_INPUT, UPDATE_STATUS_INPUT,
};
use super::routes::{resolve, Route, RouteMatch};
use crate::commands::context::CommandContext;
use crate::core::{BotError, ComponentKind, OutgoingMessage};
use crate::database::{BotDataDocument, FactionGoal, GoalStatus};
use crate::interaction::{FormSubmission, Response};

pub const FARMING_FORM_ID: &str = "farming_form";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Farming,
    CreateGoal,
    UpdateGoal,
    ConfirmDeleteGoal,
    UpdateBotData,
}

pub const FORM_ROUTES: &[Route<FormAction>] = &[
    Route::exact(FARMING_FORM_ID, FormAction::Farming),
    Route::prefix("create_faction_goal_", FormAction::CreateGoal),
    Route::prefix("update_goal_modal_", FormAction::UpdateGoal),
    Route::prefix("confirm_delete_goal_", FormAction::ConfirmDeleteGoal),
    Route::prefix("update_bot_data_modal_", FormAction::UpdateBotData),
];

pub async fn handle_form(ctx: &CommandContext, form: &FormSubmission) -> Result<Response> {
    let (action, suffix) = match resolve(FORM_ROUTES, &form.custom_id) {
        RouteMatch::Handled { action, suffix } => (action, suffix),
        RouteMatch::FallThrough => {
            return Err(BotError::UnknownInteractionIdentifier {
                kind: ComponentKind::Form,
                custom_id: form.custom_id.clone(),
            }
            .into())
        }
    };

    let message = match action {
        FormAction::Farming => {
            OutgoingMessage::ephemeral("You have successfully submitted the farming data form")
        }
        FormAction::CreateGoal => create_goal(ctx, form).await?,
        FormAction::UpdateGoal => update_goal(ctx, form, suffix).await?,
        FormAction::ConfirmDeleteGoal => confirm_delete_goal(ctx, form, suffix).await?,
        FormAction::UpdateBotData => update_bot_data(ctx, form, suffix).await?,
    };
    Ok(Response::Message(message))
}

fn optional_field(form: &FormSubmission, input: &str) -> Option<String> {
    form.field(input)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_status(form: &FormSubmission, input: &str) -> Result<GoalStatus, OutgoingMessage> {
    form.field(input)
        .unwrap_or_default()
        .parse::<GoalStatus>()
        .map_err(|e| OutgoingMessage::ephemeral(e.to_string()))
}

async fn create_goal(ctx: &CommandContext, form: &FormSubmission) -> Result<OutgoingMessage> {
    let Some(goal_name) = optional_field(form, GOAL_NAME_INPUT) else {
        return Ok(OutgoingMessage::ephemeral("A goal name is required."));
    };
    let status = match parse_status(form, GOAL_STATUS_INPUT) {
        Ok(status) => status,
        Err(message) => return Ok(message),
    };

    let goal = FactionGoal {
        faction_id: ctx.faction_id.clone(),
        goal_name,
        description: optional_field(form, GOAL_DESCRIPTION_INPUT),
        status,
    };
    let outcome = ctx.repository.goals.create(&goal).await?;
    info!("Faction goal {} saved for {}", goal.goal_name, goal.faction_id);

    let verb = if outcome.inserted { "created" } else { "updated" };
    Ok(OutgoingMessage::ephemeral(format!(
        "The faction goal **{}** has been {verb}.",
        goal.goal_name
    )))
}

async fn update_goal(
    ctx: &CommandContext,
    form: &FormSubmission,
    goal_name: &str,
) -> Result<OutgoingMessage> {
    let status = match parse_status(form, UPDATE_STATUS_INPUT) {
        Ok(status) => status,
        Err(message) => return Ok(message),
    };

    // The goal may have been deleted while the form was open
    if ctx.repository.goals.get(&ctx.faction_id, goal_name).await?.is_none() {
        return Ok(OutgoingMessage::ephemeral(format!(
            "The goal **{goal_name}** does not exist."
        )));
    }

    let goal = FactionGoal {
        faction_id: ctx.faction_id.clone(),
        goal_name: goal_name.to_string(),
        description: optional_field(form, UPDATE_DESCRIPTION_INPUT),
        status,
    };
    ctx.repository.goals.update(&goal).await?;
    Ok(OutgoingMessage::ephemeral(format!(
        "The goal **{goal_name}** has been updated. Status: {status}"
    )))
}

/// Deletes only when the confirmation matches the goal name exactly
async fn confirm_delete_goal(
    ctx: &CommandContext,
    form: &FormSubmission,
    goal_name: &str,
) -> Result<OutgoingMessage> {
    let confirmation = form.field(DELETE_CONFIRMATION_INPUT).unwrap_or_default();
    if confirmation != goal_name {
        return Ok(OutgoingMessage::ephemeral(format!(
            "Deletion cancelled: the confirmation text did not match. Type **{goal_name}** exactly to delete the goal (confirmation mismatch)."
        )));
    }

    let deleted = ctx.repository.goals.delete(&ctx.faction_id, goal_name).await?;
    let content = if deleted {
        info!("Faction goal {goal_name} deleted for {}", ctx.faction_id);
        format!("The goal **{goal_name}** has been deleted.")
    } else {
        format!("The goal **{goal_name}** does not exist.")
    };
    Ok(OutgoingMessage::ephemeral(content))
}

async fn update_bot_data(
    ctx: &CommandContext,
    form: &FormSubmission,
    guild_id: &str,
) -> Result<OutgoingMessage> {
    let mut document = BotDataDocument::new(guild_id);
    let mut invalid = Vec::new();

    for (input_id, label) in BOT_DATA_INPUTS {
        let value = optional_field(form, input_id);
        if let Some(id) = &value {
            if !id.chars().all(|c| c.is_ascii_digit()) {
                invalid.push(label);
                continue;
            }
        }
        if let Some(slot) = document.channel_mut(input_id) {
            *slot = value;
        }
    }

    if !invalid.is_empty() {
        return Ok(OutgoingMessage::ephemeral(format!(
            "Channel ids must be numeric. Please check: {}",
            invalid.join(", ")
        )));
    }

    ctx.repository.bot_data.update(&document).await?;
    info!("Bot channel data saved for guild {guild_id}");
    Ok(OutgoingMessage::ephemeral("The bot channel data has been saved."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::routes::shadowed_routes;
    use crate::database::Collection;
    use crate::database::Filter;
    use crate::testing::{harness, FACTION_ID, GUILD_ID};
    use std::collections::HashMap;

    fn form(custom_id: &str, fields: &[(&str, &str)]) -> FormSubmission {
        FormSubmission {
            custom_id: custom_id.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn content(response: Response) -> String {
        match response {
            Response::Message(message) => {
                assert!(message.ephemeral);
                message.content
            }
            other => panic!("expected a message, got {other:?}"),
        }
    }

    #[test]
    fn test_routes_do_not_shadow() {
        assert!(shadowed_routes(FORM_ROUTES).is_empty());
    }

    #[tokio::test]
    async fn test_confirm_delete_exact_match_deletes_once() {
        let h = harness();
        h.context
            .repository
            .goals
            .create(&FactionGoal::new(FACTION_ID, "Bushmaster"))
            .await
            .unwrap();

        let response = handle_form(
            &h.context,
            &form("confirm_delete_goal_Bushmaster", &[("delete_confirmation", "Bushmaster")]),
        )
        .await
        .unwrap();

        assert!(content(response).contains("has been deleted"));
        let expected = Filter::new()
            .eq("faction_id", FACTION_ID)
            .eq("goal_name", "Bushmaster");
        assert_eq!(h.store.deletes(), vec![(Collection::FactionGoals, expected)]);
    }

    #[tokio::test]
    async fn test_confirm_delete_case_mismatch_cancels() {
        let h = harness();
        h.context
            .repository
            .goals
            .create(&FactionGoal::new(FACTION_ID, "Bushmaster"))
            .await
            .unwrap();

        let response = handle_form(
            &h.context,
            &form("confirm_delete_goal_Bushmaster", &[("delete_confirmation", "bushmaster")]),
        )
        .await
        .unwrap();

        let text = content(response);
        assert!(text.contains("cancelled"));
        assert!(text.contains("mismatch"));
        assert!(h.store.deletes().is_empty());
        assert!(h
            .context
            .repository
            .goals
            .get(FACTION_ID, "Bushmaster")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_confirm_delete_does_not_trim() {
        let h = harness();
        handle_form(
            &h.context,
            &form("confirm_delete_goal_Bushmaster", &[("delete_confirmation", " Bushmaster ")]),
        )
        .await
        .unwrap();
        assert!(h.store.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_create_goal_defaults() {
        let h = harness();
        let response = handle_form(
            &h.context,
            &form(
                "create_faction_goal_modal",
                &[("faction_goal_name", "Land claim"), ("faction_goal_description", "")],
            ),
        )
        .await
        .unwrap();

        assert!(content(response).contains("has been created"));
        let goal = h
            .context
            .repository
            .goals
            .get(FACTION_ID, "Land claim")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(goal.status, GoalStatus::Tba);
        assert_eq!(goal.description_or_default(), "No description available");
        assert_eq!(h.store.upserts().len(), 1);
    }

    #[tokio::test]
    async fn test_create_goal_invalid_status_writes_nothing() {
        let h = harness();
        let response = handle_form(
            &h.context,
            &form(
                "create_faction_goal_modal",
                &[("faction_goal_name", "Land claim"), ("faction_goal_status", "someday")],
            ),
        )
        .await
        .unwrap();
        assert!(content(response).contains("not a goal status"));
        assert_eq!(h.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_update_goal_writes_status() {
        let h = harness();
        h.context
            .repository
            .goals
            .create(&FactionGoal::new(FACTION_ID, "Bushmaster"))
            .await
            .unwrap();
        handle_form(
            &h.context,
            &form(
                "update_goal_modal_Bushmaster",
                &[("goal_description", "Truck"), ("goal_status", "In Progress")],
            ),
        )
        .await
        .unwrap();

        let goal = h
            .context
            .repository
            .goals
            .get(FACTION_ID, "Bushmaster")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert_eq!(goal.description.as_deref(), Some("Truck"));
    }

    #[tokio::test]
    async fn test_update_goal_blank_description_clears_it() {
        let h = harness();
        let mut goal = FactionGoal::new(FACTION_ID, "Bushmaster");
        goal.description = Some("Buy the truck".to_string());
        h.context.repository.goals.create(&goal).await.unwrap();

        let response = handle_form(
            &h.context,
            &form(
                "update_goal_modal_Bushmaster",
                &[("goal_description", "  "), ("goal_status", "Pending")],
            ),
        )
        .await
        .unwrap();

        assert!(content(response).contains("has been updated"));
        let stored = h
            .context
            .repository
            .goals
            .get(FACTION_ID, "Bushmaster")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.description, None);
        assert_eq!(stored.description_or_default(), "No description available");
    }

    #[tokio::test]
    async fn test_update_goal_after_delete_writes_nothing() {
        let h = harness();
        let response = handle_form(
            &h.context,
            &form(
                "update_goal_modal_Ghost",
                &[("goal_description", "Boo"), ("goal_status", "Pending")],
            ),
        )
        .await
        .unwrap();

        assert_eq!(content(response), "The goal **Ghost** does not exist.");
        assert_eq!(h.store.writes(), 0);
        assert!(h
            .context
            .repository
            .goals
            .get(FACTION_ID, "Ghost")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_bot_data_saves_channels() {
        let h = harness();
        let custom_id = format!("update_bot_data_modal_{GUILD_ID}");
        handle_form(
            &h.context,
            &form(&custom_id, &[("discord_farming_channel_id", " 456 ")]),
        )
        .await
        .unwrap();

        let stored = h
            .context
            .repository
            .bot_data
            .find_by_id(GUILD_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.discord_farming_channel_id.as_deref(), Some("456"));
        assert_eq!(stored.discord_faction_goals_channel_id, None);
    }

    #[tokio::test]
    async fn test_update_bot_data_rejects_non_numeric() {
        let h = harness();
        let custom_id = format!("update_bot_data_modal_{GUILD_ID}");
        let response = handle_form(
            &h.context,
            &form(&custom_id, &[("discord_farming_channel_id", "#farming")]),
        )
        .await
        .unwrap();
        assert!(content(response).contains("Farming channel id"));
        assert_eq!(h.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_farming_form_acknowledges_without_write() {
        let h = harness();
        let response = handle_form(&h.context, &form("farming_form", &[])).await.unwrap();
        assert_eq!(
            content(response),
            "You have successfully submitted the farming data form"
        );
        assert_eq!(h.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_unknown_form_is_error() {
        let h = harness();
        let error = handle_form(&h.context, &form("farming_form_v2", &[]))
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "No operation for the form id farming_form_v2 was found"
        );
    }
}
