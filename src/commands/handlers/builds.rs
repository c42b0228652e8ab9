//! Character build command handlers
//!
//! Handles: save-build, show-builds
//!
//! Traits are entered as comma separated lists. Each member keeps one build
//! per faction; saving again replaces it.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandOption, SlashCommandHandler};
use crate::core::{BotError, OutgoingMessage};
use crate::database::FactionBuild;
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

pub const PROFESSION_OPTION: &str = "profession";
pub const POSITIVE_TRAITS_OPTION: &str = "positive-traits";
pub const NEGATIVE_TRAITS_OPTION: &str = "negative-traits";

pub const NO_BUILDS_MESSAGE: &str = "No builds have been saved for this faction yet.";

pub struct SaveBuildCommand;

#[async_trait]
impl SlashCommandHandler for SaveBuildCommand {
    fn name(&self) -> &'static str {
        "save-build"
    }

    fn description(&self) -> &'static str {
        "Save your character build"
    }

    fn options(&self) -> &'static [CommandOption] {
        const OPTIONS: &[CommandOption] = &[
            CommandOption::string(PROFESSION_OPTION, "Character profession", true),
            CommandOption::string(
                POSITIVE_TRAITS_OPTION,
                "Positive traits, separated by commas",
                false,
            ),
            CommandOption::string(
                NEGATIVE_TRAITS_OPTION,
                "Negative traits, separated by commas",
                false,
            ),
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
        let profession = command
            .string(PROFESSION_OPTION)
            .map(str::trim)
            .filter(|profession| !profession.is_empty())
            .ok_or_else(|| BotError::MissingOption(PROFESSION_OPTION.to_string()))?;

        let build = FactionBuild {
            faction_id: ctx.faction_id.clone(),
            discord_user_id: invoker.user_id.clone(),
            discord_username: invoker.username.clone(),
            profession: profession.to_string(),
            positive_traits: split_traits(command.string(POSITIVE_TRAITS_OPTION)),
            negative_traits: split_traits(command.string(NEGATIVE_TRAITS_OPTION)),
        };
        ctx.repository.builds.upsert(&build).await?;
        info!("Build saved for {} ({})", invoker.username, invoker.user_id);

        reply
            .reply(OutgoingMessage::ephemeral(format!(
                "Your build has been saved.\n{}",
                build_line(&build)
            )))
            .await
    }
}

pub struct ShowBuildsCommand;

#[async_trait]
impl SlashCommandHandler for ShowBuildsCommand {
    fn name(&self) -> &'static str {
        "show-builds"
    }

    fn description(&self) -> &'static str {
        "List the faction's saved character builds"
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        _invoker: &Invoker,
        _command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let builds = ctx.repository.builds.list(&ctx.faction_id).await?;
        let content = if builds.is_empty() {
            NO_BUILDS_MESSAGE.to_string()
        } else {
            let lines: Vec<String> = builds.iter().map(build_line).collect();
            format!("**Faction builds**\n{}", lines.join("\n"))
        };
        reply.reply(OutgoingMessage::ephemeral(content)).await
    }
}

fn split_traits(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn build_line(build: &FactionBuild) -> String {
    fn traits(names: &[String]) -> String {
        if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        }
    }

    format!(
        "**{}** - {} (positive: {}; negative: {})",
        build.discord_username,
        build.profession,
        traits(&build.positive_traits),
        traits(&build.negative_traits)
    )
}
