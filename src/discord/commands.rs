//! Guild slash command registration
//!
//! Command definitions are derived from the registry's descriptors, so the
//! set registered with Discord always matches the set the dispatcher serves.

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::http::Http;
use serenity::model::application::command::CommandOptionType;
use serenity::model::id::GuildId;

use crate::commands::handler::{OptionKind, SlashCommandHandler};
use crate::commands::CommandRegistry;

/// Build the Discord definition of one command
pub fn create_command(handler: &dyn SlashCommandHandler) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name(handler.name())
        .description(handler.description());
    for option in handler.options() {
        command.create_option(|created| {
            created
                .name(option.name)
                .description(option.description)
                .kind(match option.kind {
                    OptionKind::String => CommandOptionType::String,
                    OptionKind::Integer => CommandOptionType::Integer,
                })
                .required(option.required)
        });
    }
    command
}

/// Replace the guild's command set with every registered command
pub async fn register_guild_commands(
    http: &Http,
    guild_id: GuildId,
    registry: &CommandRegistry,
) -> Result<()> {
    let handlers = registry.handlers();
    guild_id
        .set_application_commands(http, |commands| {
            for handler in &handlers {
                commands.add_application_command(create_command(handler.as_ref()));
            }
            commands
        })
        .await?;

    info!(
        "Guild slash commands registered for guild {} ({} commands)",
        guild_id,
        handlers.len()
    );
    Ok(())
}
