//! Select menu handler

use anyhow::Result;

use super::routes::{resolve, Route, RouteMatch};
use crate::commands::context::CommandContext;
use crate::core::{BotError, ComponentKind, OutgoingMessage};
use crate::interaction::{MenuSelection, Response};

pub const MAP_SELECTOR_MENU_ID: &str = "PZfans_map_selector_menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    MapLinks,
}

pub const MENU_ROUTES: &[Route<MenuAction>] =
    &[Route::exact(MAP_SELECTOR_MENU_ID, MenuAction::MapLinks)];

pub async fn handle_select(ctx: &CommandContext, selection: &MenuSelection) -> Result<Response> {
    let action = match resolve(MENU_ROUTES, &selection.custom_id) {
        RouteMatch::Handled { action, .. } => action,
        RouteMatch::FallThrough => {
            return Err(BotError::UnknownInteractionIdentifier {
                kind: ComponentKind::SelectMenu,
                custom_id: selection.custom_id.clone(),
            }
            .into())
        }
    };

    match action {
        MenuAction::MapLinks => {
            let raw = selection.values.first().map(String::as_str).unwrap_or_default();
            let index = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| BotError::InvalidSelection(raw.to_string()))?;

            // The list may have changed since the menu was posted
            let maps = ctx.maps.load().await?;
            let map = maps.get(index).ok_or(BotError::SelectionOutOfRange {
                index,
                len: maps.len(),
            })?;
            Ok(Response::Message(OutgoingMessage::ephemeral(map.link_message())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;

    fn selection(custom_id: &str, value: &str) -> MenuSelection {
        MenuSelection {
            custom_id: custom_id.to_string(),
            values: vec![value.to_string()],
        }
    }

    #[tokio::test]
    async fn test_selected_index_resolves_entry() {
        let h = harness();
        let response = handle_select(&h.context, &selection(MAP_SELECTOR_MENU_ID, "1"))
            .await
            .unwrap();
        assert_eq!(
            response,
            Response::Message(OutgoingMessage::ephemeral(
                "**West Point**\n[West Point](https://pzfans.com/maps/2)\n\nWest Point, Kentucky\n"
            ))
        );
    }

    #[tokio::test]
    async fn test_out_of_range_index_fails() {
        let h = harness();
        let error = handle_select(&h.context, &selection(MAP_SELECTOR_MENU_ID, "7"))
            .await
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<BotError>(),
            Some(BotError::SelectionOutOfRange { index: 7, len: 3 })
        ));
    }

    #[tokio::test]
    async fn test_non_numeric_value_fails() {
        let h = harness();
        let menu = selection(MAP_SELECTOR_MENU_ID, "https://pzfans.com");
        let error = handle_select(&h.context, &menu)
            .await
            .unwrap_err();
        assert!(matches!(
            error.downcast_ref::<BotError>(),
            Some(BotError::InvalidSelection(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_menu_is_error() {
        let h = harness();
        let error = handle_select(&h.context, &selection("other_menu", "0"))
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "No operation for the select menu id other_menu was found"
        );
    }
}
