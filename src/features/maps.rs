//! # Map Catalog
//!
//! The PZfans map list backing the map selector menu and the lootable areas
//! posts. The JSON file is read on every request, so edits take effect
//! without a restart.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

use crate::core::SelectOption;

/// Discord caps a select menu at 25 options
pub const MAX_MENU_OPTIONS: usize = 25;

/// Discord caps option labels and descriptions at 100 characters
const MAX_OPTION_TEXT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub id: String,
    pub label: String,
    pub description: String,
    pub url: String,
}

impl MapEntry {
    /// Reply body shown when the map is picked from the selector
    pub fn link_message(&self) -> String {
        format!(
            "**{label}**\n[{label}]({url})\n\n{description}\n",
            label = self.label,
            url = self.url,
            description = self.description
        )
    }

    /// Channel post for the lootable areas list
    pub fn lootable_area_post(&self) -> String {
        format!(
            "**{label}**\n{description}\nLast looted: N/A\n[{label} map url (pzfans.com):] {url}\n",
            label = self.label,
            description = self.description,
            url = self.url
        )
    }
}

#[derive(Debug, Clone)]
pub enum MapSource {
    File(PathBuf),
    Inline(Vec<MapEntry>),
}

#[derive(Debug, Clone)]
pub struct MapCatalog {
    source: MapSource,
}

impl MapCatalog {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: MapSource::File(path.into()),
        }
    }

    pub fn inline(entries: Vec<MapEntry>) -> Self {
        Self {
            source: MapSource::Inline(entries),
        }
    }

    /// Load the current list, in file order
    pub async fn load(&self) -> Result<Vec<MapEntry>> {
        match &self.source {
            MapSource::Inline(entries) => Ok(entries.clone()),
            MapSource::File(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read map data {}", path.display()))?;
                parse_entries(&raw)
                    .with_context(|| format!("Malformed map data in {}", path.display()))
            }
        }
    }

    /// Menu options whose values are indices into the loaded list
    pub fn menu_options(entries: &[MapEntry]) -> Vec<SelectOption> {
        entries
            .iter()
            .take(MAX_MENU_OPTIONS)
            .enumerate()
            .map(|(index, entry)| SelectOption {
                label: clip(&entry.label),
                value: index.to_string(),
                description: (!entry.description.is_empty()).then(|| clip(&entry.description)),
            })
            .collect()
    }
}

/// Accepts either an array of entries or an object whose values are entries
pub fn parse_entries(raw: &str) -> Result<Vec<MapEntry>> {
    let value: Value = serde_json::from_str(raw)?;
    let entries = match value {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, item)| item).collect(),
        other => anyhow::bail!("expected an array or object of maps, found {other}"),
    };
    entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).map_err(Into::into))
        .collect()
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_OPTION_TEXT {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_OPTION_TEXT - 3).collect();
    clipped.push_str("...");
    clipped
}
