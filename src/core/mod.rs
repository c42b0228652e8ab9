//! # Core Module
//!
//! Configuration, the error taxonomy, the outgoing message value types and
//! the outbound gateway seam shared by commands, pattern handlers and the
//! Discord adapter.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.3.0: Add Gateway seam for channel posts
//! - 1.2.0: Add select menus and modal inputs to the message types
//! - 1.1.0: Add BotError taxonomy
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod error;
pub mod gateway;
pub mod message;

// Re-export commonly used items
pub use config::{Config, DatabaseConfig};
pub use error::{BotError, ComponentKind};
pub use gateway::Gateway;
pub use message::{
    ActionRow, ButtonStyle, Component, InputStyle, Modal, OutgoingMessage, SelectOption,
    TextInput, MESSAGE_LIMIT,
};
