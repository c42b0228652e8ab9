//! Bot error taxonomy
//!
//! User-facing outcomes such as "goal not found", a failed role check, or a
//! mismatched delete confirmation are replies, not errors. The variants here
//! are the failures that escape a handler and reach the dispatcher.

use std::fmt;
use thiserror::Error;

/// Which pattern handler rejected an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Button,
    Form,
    SelectMenu,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Button => "button",
            ComponentKind::Form => "form",
            ComponentKind::SelectMenu => "select menu",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("No operation for the {kind} id {custom_id} was found")]
    UnknownInteractionIdentifier {
        kind: ComponentKind,
        custom_id: String,
    },

    #[error("Selected option {index} is out of range for a list of {len} entries")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("Selected option `{0}` is not a list index")]
    InvalidSelection(String),

    #[error("A command named `{0}` is already registered")]
    DuplicateCommand(String),

    #[error("Missing required option `{0}`")]
    MissingOption(String),

    #[error("The interaction has already been responded to")]
    AlreadyResponded,

    #[error("The interaction has not been responded to yet")]
    NotResponded,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BotError {
    /// Unknown identifiers point at a stale component or a wiring defect
    pub fn is_programming_defect(&self) -> bool {
        matches!(
            self,
            BotError::UnknownInteractionIdentifier { .. }
                | BotError::DuplicateCommand(_)
                | BotError::AlreadyResponded
                | BotError::NotResponded
        )
    }
}
