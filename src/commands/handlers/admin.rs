//! Admin command handlers
//!
//! Handles: change-bot-username
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Username changes go through the gateway with a deferred reply
//! - 1.0.0: Role-restricted bot username command

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandOption, SlashCommandHandler};
use crate::core::OutgoingMessage;
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

pub const BOT_ADMINISTRATOR_ROLE: &str = "Bot administrator";
pub const USERNAME_OPTION: &str = "bot-username";

pub const INVALID_USERNAME_MESSAGE: &str =
    "The new username for the bot is invalid. Please ensure the name contains valid characters (a-z A-Z 0-9)";

/// Discord username bounds
const USERNAME_MIN_CHARS: usize = 2;
const USERNAME_MAX_CHARS: usize = 32;

pub struct ChangeBotUsernameCommand;

#[async_trait]
impl SlashCommandHandler for ChangeBotUsernameCommand {
    fn name(&self) -> &'static str {
        "change-bot-username"
    }

    fn description(&self) -> &'static str {
        "Change the bot username"
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[BOT_ADMINISTRATOR_ROLE]
    }

    fn options(&self) -> &'static [CommandOption] {
        const OPTIONS: &[CommandOption] = &[CommandOption::string(
            USERNAME_OPTION,
            "The new username for the bot",
            true,
        )];
        OPTIONS
    }

    async fn execute(
        &self,
        ctx: &CommandContext,
        invoker: &Invoker,
        command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()> {
        let username = command.string(USERNAME_OPTION).unwrap_or_default().trim();
        if !is_valid_username(username) {
            return reply
                .reply(OutgoingMessage::ephemeral(INVALID_USERNAME_MESSAGE))
                .await;
        }

        // Profile edits are rate limited and can outlast the initial response window
        reply.defer(true).await?;
        ctx.gateway.set_username(username).await?;
        info!(
            "🤖 Bot username changed to {} by {} ({})",
            username, invoker.username, invoker.user_id
        );
        reply
            .edit_reply(&format!("The bot username has been changed to {username}"))
            .await
    }
}

fn is_valid_username(username: &str) -> bool {
    let chars = username.chars().count();
    (USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&chars)
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::OptionValue;
    use crate::testing::{harness, invoker, recording_reply, Sent};

    fn command(username: &str) -> ChatCommand {
        let mut command = ChatCommand {
            name: "change-bot-username".to_string(),
            ..ChatCommand::default()
        };
        command.options.insert(
            USERNAME_OPTION.to_string(),
            OptionValue::String(username.to_string()),
        );
        command
    }

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("Kush Bot"));
        assert!(is_valid_username("bot_2"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("x"));
        assert!(!is_valid_username("bot@home"));
        assert!(!is_valid_username(&"a".repeat(33)));
    }

    #[tokio::test]
    async fn test_empty_username_gets_validation_reply() {
        let harness = harness();
        let (mut reply, log) = recording_reply();

        ChangeBotUsernameCommand
            .execute(
                &harness.context,
                &invoker(&[BOT_ADMINISTRATOR_ROLE]),
                &command("   "),
                &mut reply,
            )
            .await
            .unwrap();

        assert_eq!(
            log.sent(),
            vec![Sent::Reply(OutgoingMessage::ephemeral(INVALID_USERNAME_MESSAGE))]
        );
        assert!(harness.gateway.usernames().is_empty());
    }

    #[tokio::test]
    async fn test_username_changed_through_gateway() {
        let harness = harness();
        let (mut reply, log) = recording_reply();

        ChangeBotUsernameCommand
            .execute(
                &harness.context,
                &invoker(&[BOT_ADMINISTRATOR_ROLE]),
                &command(" Kush Bot "),
                &mut reply,
            )
            .await
            .unwrap();

        assert_eq!(harness.gateway.usernames(), vec!["Kush Bot".to_string()]);
        assert_eq!(
            log.sent(),
            vec![
                Sent::Defer { ephemeral: true },
                Sent::EditReply("The bot username has been changed to Kush Bot".to_string())
            ]
        );
    }
}
