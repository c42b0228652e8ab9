//! # Database Module
//!
//! Document persistence for guild configuration and faction records. A
//! [`Repository`] façade composes one typed sub-repository per document
//! family, all sharing a single [`DocumentStore`] backend.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: SQLite connection pool bounds from configuration
//! - 1.0.0: Document store seam, memory and SQLite backends, typed repositories

pub mod bot_data;
pub mod builds;
pub mod goals;
pub mod memory;
pub mod models;
pub mod resources;
pub mod sqlite;
pub mod store;

use anyhow::Result;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::core::{BotError, DatabaseConfig};

pub use bot_data::BotDataRepository;
pub use builds::FactionBuildsRepository;
pub use goals::FactionGoalsRepository;
pub use memory::MemoryDocumentStore;
pub use models::{BotDataDocument, FactionBuild, FactionGoal, FactionResources, GoalStatus};
pub use resources::FactionResourcesRepository;
pub use sqlite::SqliteDocumentStore;
pub use store::{Collection, Document, DocumentStore, Filter, StoreError, UpsertOutcome};

/// Typed access to every collection the bot uses
#[derive(Clone)]
pub struct Repository {
    pub bot_data: BotDataRepository,
    pub goals: FactionGoalsRepository,
    pub resources: FactionResourcesRepository,
    pub builds: FactionBuildsRepository,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            bot_data: BotDataRepository::new(Arc::clone(&store)),
            goals: FactionGoalsRepository::new(Arc::clone(&store)),
            resources: FactionResourcesRepository::new(Arc::clone(&store)),
            builds: FactionBuildsRepository::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryDocumentStore::new()))
    }
}

/// Open the backend named by the connection string scheme
///
/// `memory://` keeps documents in process; `sqlite://<dir>` stores them in
/// `<dir>/<name>.sqlite3` (`sqlite://:memory:` for a private in-memory database).
pub fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>> {
    let connection_string = config.resolved_connection_string();

    if connection_string.starts_with("memory://") {
        info!("📦 Using in-memory document store");
        return Ok(Arc::new(MemoryDocumentStore::new()));
    }

    if let Some(location) = connection_string.strip_prefix("sqlite://") {
        let store = if location == ":memory:" {
            SqliteDocumentStore::open_in_memory()?
        } else {
            SqliteDocumentStore::open(
                location,
                &config.name,
                config.min_pool_size,
                config.max_pool_size,
            )?
        };
        info!(
            "📦 Using SQLite document store (pool {}..={})",
            config.min_pool_size, config.max_pool_size
        );
        return Ok(Arc::new(store));
    }

    // Only the scheme is reported; the rest may hold credentials
    let scheme = connection_string
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .unwrap_or("<none>");
    Err(BotError::Config(format!("unsupported database scheme `{scheme}`")).into())
}

pub(crate) fn to_document<T: Serialize>(
    collection: Collection,
    value: &T,
) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(document)) => Ok(document),
        Ok(_) => Err(StoreError::Serialization {
            collection,
            source: serde::ser::Error::custom("document must serialize to a JSON object"),
        }),
        Err(source) => Err(StoreError::Serialization { collection, source }),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(
    collection: Collection,
    document: Document,
) -> Result<T, StoreError> {
    serde_json::from_value(serde_json::Value::Object(document))
        .map_err(|source| StoreError::Deserialization { collection, source })
}
