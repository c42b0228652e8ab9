//! Slash command handler trait and infrastructure
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: One handler per command with declared roles and options
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;

use super::context::CommandContext;
use crate::interaction::{ChatCommand, InteractionReply, Invoker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
}

/// A typed option declared on a slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOption {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

impl CommandOption {
    pub const fn string(name: &'static str, description: &'static str, required: bool) -> Self {
        Self {
            name,
            description,
            kind: OptionKind::String,
            required,
        }
    }

    pub const fn integer(name: &'static str, description: &'static str, required: bool) -> Self {
        Self {
            name,
            description,
            kind: OptionKind::Integer,
            required,
        }
    }
}

/// Trait for slash command handlers
///
/// Each handler owns one command name. The dispatcher checks
/// `required_roles` before calling `execute`, and handlers answer the
/// interaction themselves through `reply`.
///
/// # Example
///
/// ```ignore
/// pub struct HeartbeatCommand;
///
/// #[async_trait]
/// impl SlashCommandHandler for HeartbeatCommand {
///     fn name(&self) -> &'static str {
///         "check-heartbeat"
///     }
///
///     fn description(&self) -> &'static str {
///         "Check if the bot is active"
///     }
///
///     async fn execute(
///         &self,
///         _ctx: &CommandContext,
///         _invoker: &Invoker,
///         _command: &ChatCommand,
///         reply: &mut InteractionReply,
///     ) -> Result<()> {
///         reply.reply(OutgoingMessage::ephemeral("The bot is active")).await
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name, unique within the registry
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Roles allowed to run the command; empty means anyone
    fn required_roles(&self) -> &'static [&'static str] {
        &[]
    }

    fn options(&self) -> &'static [CommandOption] {
        &[]
    }

    /// Handle the slash command
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared command context with the repository, event bus and gateway
    /// * `invoker` - The member who used the command
    /// * `command` - Command name and option values
    /// * `reply` - Reply handle for this interaction
    async fn execute(
        &self,
        ctx: &CommandContext,
        invoker: &Invoker,
        command: &ChatCommand,
        reply: &mut InteractionReply,
    ) -> Result<()>;
}
