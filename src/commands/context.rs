//! Shared context for command and component handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Repository, event bus, map catalog and gateway for the faction bot
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::core::Gateway;
use crate::database::Repository;
use crate::features::{EventBus, MapCatalog};

/// Shared context for all handlers
///
/// Contains the services handlers need:
/// - Repository for guild configuration and faction records
/// - EventBus for work handed to the event listener
/// - MapCatalog for the PZfans map list
/// - Gateway for channel posts and profile changes
/// - The faction this bot instance serves
#[derive(Clone)]
pub struct CommandContext {
    pub repository: Repository,
    pub events: EventBus,
    pub maps: MapCatalog,
    pub gateway: Arc<dyn Gateway>,
    pub faction_id: String,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(
        repository: Repository,
        events: EventBus,
        maps: MapCatalog,
        gateway: Arc<dyn Gateway>,
        faction_id: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            events,
            maps,
            gateway,
            faction_id: faction_id.into(),
            start_time: std::time::Instant::now(),
        }
    }
}
