//! Stored document shapes
//!
//! Field names match the stored JSON so documents written by earlier
//! versions of the bot stay readable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_GOAL_DESCRIPTION: &str = "No description available";

/// Per-guild channel configuration, keyed by `discord_guild_id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotDataDocument {
    pub discord_guild_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_faction_goals_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_resource_storage_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_pzfans_maps_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_farming_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_areas_looted_channel_id: Option<String>,
}

impl BotDataDocument {
    pub fn new(discord_guild_id: impl Into<String>) -> Self {
        Self {
            discord_guild_id: discord_guild_id.into(),
            ..Self::default()
        }
    }

    /// Mutable channel field by its stored name
    pub fn channel_mut(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "discord_faction_goals_channel_id" => Some(&mut self.discord_faction_goals_channel_id),
            "discord_resource_storage_channel_id" => {
                Some(&mut self.discord_resource_storage_channel_id)
            }
            "discord_pzfans_maps_channel_id" => Some(&mut self.discord_pzfans_maps_channel_id),
            "discord_farming_channel_id" => Some(&mut self.discord_farming_channel_id),
            "discord_areas_looted_channel_id" => Some(&mut self.discord_areas_looted_channel_id),
            _ => None,
        }
    }

    /// Channel fields as (label, value) pairs, in display order
    pub fn channels(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("Faction goals channel", self.discord_faction_goals_channel_id.as_deref()),
            ("Resource storage channel", self.discord_resource_storage_channel_id.as_deref()),
            ("PZfans maps channel", self.discord_pzfans_maps_channel_id.as_deref()),
            ("Farming channel", self.discord_farming_channel_id.as_deref()),
            ("Areas looted channel", self.discord_areas_looted_channel_id.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[default]
    #[serde(rename = "TBA")]
    Tba,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::Pending,
        GoalStatus::InProgress,
        GoalStatus::Completed,
        GoalStatus::Tba,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Pending => "pending",
            GoalStatus::InProgress => "in progress",
            GoalStatus::Completed => "completed",
            GoalStatus::Tba => "TBA",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGoalStatus(pub String);

impl fmt::Display for InvalidGoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` is not a goal status. Use one of: pending, in progress, completed, TBA",
            self.0
        )
    }
}

impl std::error::Error for InvalidGoalStatus {}

impl FromStr for GoalStatus {
    type Err = InvalidGoalStatus;

    /// Case-insensitive; an empty value means the default status
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(GoalStatus::default());
        }
        GoalStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidGoalStatus(trimmed.to_string()))
    }
}

/// A faction goal, keyed by `faction_id` + `goal_name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionGoal {
    pub faction_id: String,
    pub goal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: GoalStatus,
}

impl FactionGoal {
    pub fn new(faction_id: impl Into<String>, goal_name: impl Into<String>) -> Self {
        Self {
            faction_id: faction_id.into(),
            goal_name: goal_name.into(),
            description: None,
            status: GoalStatus::default(),
        }
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|description| !description.trim().is_empty())
            .unwrap_or(DEFAULT_GOAL_DESCRIPTION)
    }
}

/// A faction's resource stockpile; the map is written as one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionResources {
    pub faction_id: String,
    #[serde(default)]
    pub resources: BTreeMap<String, i64>,
}

/// A member's saved character build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionBuild {
    pub faction_id: String,
    pub discord_user_id: String,
    pub discord_username: String,
    pub profession: String,
    #[serde(default)]
    pub positive_traits: Vec<String>,
    #[serde(default)]
    pub negative_traits: Vec<String>,
}
