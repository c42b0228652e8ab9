//! Per-command handler implementations
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Add resource and build commands
//! - 1.0.0: One handler per command

pub mod admin;
pub mod bot_data;
pub mod builds;
pub mod farming;
pub mod goals;
pub mod maps;
pub mod resources;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(utility::HelpCommand),
        Arc::new(utility::HeartbeatCommand),
        Arc::new(admin::ChangeBotUsernameCommand),
        Arc::new(farming::CreateBotFarmingButtonCommand),
        Arc::new(goals::CreateFactionGoalCommand),
        Arc::new(goals::ShowFactionGoalsCommand),
        Arc::new(maps::CreateLootableAreasCommand),
        Arc::new(maps::PzfansMapLinksCommand),
        Arc::new(bot_data::ShowBotDataCommand),
        Arc::new(resources::SetFactionResourceCommand),
        Arc::new(resources::ShowFactionResourcesCommand),
        Arc::new(builds::SaveBuildCommand),
        Arc::new(builds::ShowBuildsCommand),
    ]
}
