//! # Features Module
//!
//! Bot features that sit beside the interaction core: the PZfans map
//! catalog, lootable area timestamps, and the event bus with its listener.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod events;
pub mod looted;
pub mod maps;

pub use events::{BotEvent, EventBus, EventListener};
pub use maps::{MapCatalog, MapEntry, MapSource};
