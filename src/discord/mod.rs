//! # Discord Adapter
//!
//! Serenity glue: converts gateway interactions into domain events, answers
//! them through [`SerenityResponder`], posts through [`SerenityGateway`] and
//! registers the command set per guild.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod commands;
pub mod convert;
pub mod gateway;
pub mod responder;

pub use commands::{create_command, register_guild_commands};
pub use convert::to_inbound;
pub use gateway::SerenityGateway;
pub use responder::{InteractionPayload, SerenityResponder};
