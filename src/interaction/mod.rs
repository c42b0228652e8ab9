//! # Interaction Model
//!
//! Platform-free view of one inbound interaction: who invoked it, which of the
//! four supported kinds it is, and the kind-specific payload.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod reply;

use std::collections::{HashMap, HashSet};

pub use reply::{InteractionReply, InteractionResponder, ReplyState, Response};

/// The principal that triggered an interaction
#[derive(Debug, Clone, Default)]
pub struct Invoker {
    pub user_id: String,
    pub username: String,
    pub guild_id: Option<String>,
    pub channel_id: String,
    /// Role names and role ids held by the member; empty outside guilds
    pub roles: HashSet<String>,
}

/// A typed slash-command option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

#[derive(Debug, Clone, Default)]
pub struct ChatCommand {
    pub name: String,
    pub options: HashMap<String, OptionValue>,
}

impl ChatCommand {
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.options.get(name) {
            Some(OptionValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ButtonClick {
    pub custom_id: String,
    /// Content of the message the button is attached to
    pub message_content: String,
}

#[derive(Debug, Clone, Default)]
pub struct MenuSelection {
    pub custom_id: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    pub custom_id: String,
    pub fields: HashMap<String, String>,
}

impl FormSubmission {
    /// Submitted value of a text input, exactly as typed
    pub fn field(&self, custom_id: &str) -> Option<&str> {
        self.fields.get(custom_id).map(String::as_str)
    }
}

/// The four interaction kinds the bot routes
#[derive(Debug, Clone)]
pub enum Interaction {
    ChatCommand(ChatCommand),
    Button(ButtonClick),
    SelectMenu(MenuSelection),
    ModalSubmit(FormSubmission),
}

impl Interaction {
    /// Command name or custom id, used as the routing key
    pub fn identifier(&self) -> &str {
        match self {
            Interaction::ChatCommand(command) => &command.name,
            Interaction::Button(click) => &click.custom_id,
            Interaction::SelectMenu(selection) => &selection.custom_id,
            Interaction::ModalSubmit(form) => &form.custom_id,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Interaction::ChatCommand(_) => "slash command",
            Interaction::Button(_) => "button",
            Interaction::SelectMenu(_) => "select menu",
            Interaction::ModalSubmit(_) => "modal submit",
        }
    }
}

/// An interaction together with its invoker
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub invoker: Invoker,
    pub interaction: Interaction,
}
