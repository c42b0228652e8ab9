// Core layer - shared types and configuration
pub mod core;

// Interaction model and reply discipline
pub mod interaction;

// Persistence
pub mod database;

// Features layer - map catalog, looted timestamps, event bus
pub mod features;

// Pattern handlers for buttons, forms and select menus
pub mod components;

// Application layer
pub mod commands;

// Serenity adapter
pub mod discord;

#[cfg(test)]
mod testing;

pub use core::{BotError, Config};
pub use commands::{create_all_handlers, CommandContext, CommandRegistry, Dispatcher};
pub use database::{open_store, Repository};
pub use features::{EventBus, EventListener, MapCatalog};
