//! Document store seam
//!
//! A collection-oriented store holding JSON documents. Only the four
//! operations the repositories need are exposed: `find_one`, `find`,
//! `upsert` (an `updateOne` with `$set` and `upsert: true`) and `delete_one`.
//! Each call is atomic at document granularity; nothing spans documents.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

pub type Document = Map<String, Value>;

/// The logical document families, each bound to one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    BotData,
    FactionGoals,
    FactionResources,
    FactionBuilds,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::BotData => "bot_data",
            Collection::FactionGoals => "faction_goals",
            Collection::FactionResources => "faction_resources",
            Collection::FactionBuilds => "faction_builds",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunction of top-level field equalities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }

    /// The document an upsert inserts when nothing matches
    pub fn seed_document(&self) -> Document {
        self.fields.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub matched: bool,
    pub inserted: bool,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlite::Error),

    #[error("Failed to serialize document for {collection}: {source}")]
    Serialization {
        collection: Collection,
        source: serde_json::Error,
    },

    #[error("Stored document in {collection} is malformed: {source}")]
    Deserialization {
        collection: Collection,
        source: serde_json::Error,
    },

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection lock poisoned")]
    Poisoned,

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Overwrite the top-level fields named in `set`, keeping the rest
pub fn apply_set(document: &mut Document, set: &Document) {
    for (field, value) in set {
        document.insert(field.clone(), value.clone());
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    async fn find(&self, collection: Collection, filter: &Filter)
        -> Result<Vec<Document>, StoreError>;

    /// Apply `$set` to the first matching document, or insert filter + set
    async fn upsert(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> Result<UpsertOutcome, StoreError>;

    /// Delete the first matching document, returning whether one existed
    async fn delete_one(&self, collection: Collection, filter: &Filter)
        -> Result<bool, StoreError>;
}
