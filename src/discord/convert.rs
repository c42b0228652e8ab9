//! Serenity interaction conversion
//!
//! Turns the gateway's interaction payloads into [`InboundEvent`]s. Member
//! roles are resolved to names through the cache; the raw role ids are kept
//! alongside so either form satisfies a role requirement.

use serde_json::Value;
use serenity::model::application::component::{ActionRow, ActionRowComponent, ComponentType};
use serenity::model::application::interaction::application_command::CommandDataOption;
use serenity::model::application::interaction::Interaction as SerenityInteraction;
use serenity::model::guild::Member;
use serenity::model::id::{ChannelId, GuildId, RoleId};
use serenity::model::user::User;
use serenity::prelude::Context;
use std::collections::{HashMap, HashSet};

use crate::interaction::{
    ButtonClick, ChatCommand, FormSubmission, InboundEvent, Interaction, Invoker, MenuSelection,
    OptionValue,
};

/// Convert a serenity interaction; pings and autocomplete have no domain form
pub fn to_inbound(ctx: &Context, interaction: &SerenityInteraction) -> Option<InboundEvent> {
    match interaction {
        SerenityInteraction::ApplicationCommand(command) => Some(InboundEvent {
            invoker: invoker(
                ctx,
                &command.user,
                command.member.as_ref(),
                command.guild_id,
                command.channel_id,
            ),
            interaction: Interaction::ChatCommand(ChatCommand {
                name: command.data.name.clone(),
                options: command_options(&command.data.options),
            }),
        }),
        SerenityInteraction::MessageComponent(component) => {
            let interaction = if component.data.component_type == ComponentType::Button {
                Interaction::Button(ButtonClick {
                    custom_id: component.data.custom_id.clone(),
                    message_content: component.message.content.clone(),
                })
            } else {
                Interaction::SelectMenu(MenuSelection {
                    custom_id: component.data.custom_id.clone(),
                    values: component.data.values.clone(),
                })
            };
            Some(InboundEvent {
                invoker: invoker(
                    ctx,
                    &component.user,
                    component.member.as_ref(),
                    component.guild_id,
                    component.channel_id,
                ),
                interaction,
            })
        }
        SerenityInteraction::ModalSubmit(modal) => Some(InboundEvent {
            invoker: invoker(
                ctx,
                &modal.user,
                modal.member.as_ref(),
                modal.guild_id,
                modal.channel_id,
            ),
            interaction: Interaction::ModalSubmit(FormSubmission {
                custom_id: modal.data.custom_id.clone(),
                fields: form_fields(&modal.data.components),
            }),
        }),
        _ => None,
    }
}

fn invoker(
    ctx: &Context,
    user: &User,
    member: Option<&Member>,
    guild_id: Option<GuildId>,
    channel_id: ChannelId,
) -> Invoker {
    let role_ids = member.map(|member| member.roles.as_slice()).unwrap_or_default();
    let roles = match guild_id {
        Some(guild_id) => role_set(role_ids, |role_id| {
            ctx.cache.role(guild_id, role_id).map(|role| role.name)
        }),
        None => HashSet::new(),
    };

    Invoker {
        user_id: user.id.to_string(),
        username: user.name.clone(),
        guild_id: guild_id.map(|id| id.to_string()),
        channel_id: channel_id.to_string(),
        roles,
    }
}

/// Role ids plus every name the resolver knows
pub fn role_set(
    role_ids: &[RoleId],
    mut resolve_name: impl FnMut(RoleId) -> Option<String>,
) -> HashSet<String> {
    let mut roles = HashSet::with_capacity(role_ids.len() * 2);
    for role_id in role_ids {
        roles.insert(role_id.to_string());
        if let Some(name) = resolve_name(*role_id) {
            roles.insert(name);
        }
    }
    roles
}

fn command_options(options: &[CommandDataOption]) -> HashMap<String, OptionValue> {
    options
        .iter()
        .filter_map(|option| {
            option
                .value
                .as_ref()
                .and_then(option_value)
                .map(|value| (option.name.clone(), value))
        })
        .collect()
}

pub fn option_value(value: &Value) -> Option<OptionValue> {
    match value {
        Value::String(text) => Some(OptionValue::String(text.clone())),
        Value::Number(number) => number.as_i64().map(OptionValue::Integer),
        Value::Bool(flag) => Some(OptionValue::Boolean(*flag)),
        _ => None,
    }
}

fn form_fields(rows: &[ActionRow]) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for row in rows {
        for component in &row.components {
            if let ActionRowComponent::InputText(input) = component {
                fields.insert(input.custom_id.clone(), input.value.clone());
            }
        }
    }
    fields
}
