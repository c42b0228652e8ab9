//! Faction resource stockpiles (`faction_resources`)
//!
//! The `resources` map is written as a single field. Two callers updating
//! different resources at the same time race, and the later write wins for
//! the whole map.

use serde_json::Value;
use std::sync::Arc;

use super::models::FactionResources;
use super::store::{Collection, Document, DocumentStore, Filter, StoreError, UpsertOutcome};
use super::from_document;

const COLLECTION: Collection = Collection::FactionResources;

#[derive(Clone)]
pub struct FactionResourcesRepository {
    store: Arc<dyn DocumentStore>,
}

impl FactionResourcesRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn key(faction_id: &str) -> Filter {
        Filter::new().eq("faction_id", faction_id)
    }

    pub async fn get(&self, faction_id: &str) -> Result<Option<FactionResources>, StoreError> {
        self.store
            .find_one(COLLECTION, &Self::key(faction_id))
            .await?
            .map(|document| from_document(COLLECTION, document))
            .transpose()
    }

    /// Replace the stored resources map with `resources.resources`
    pub async fn upsert(&self, resources: &FactionResources) -> Result<UpsertOutcome, StoreError> {
        let map = serde_json::to_value(&resources.resources)
            .map_err(|source| StoreError::Serialization {
                collection: COLLECTION,
                source,
            })?;
        let mut set = Document::new();
        set.insert("resources".to_string(), map);
        set.insert(
            "faction_id".to_string(),
            Value::String(resources.faction_id.clone()),
        );
        self.store
            .upsert(COLLECTION, &Self::key(&resources.faction_id), set)
            .await
    }

    /// Set one resource amount by rewriting the whole map
    pub async fn set_amount(
        &self,
        faction_id: &str,
        resource: &str,
        amount: i64,
    ) -> Result<FactionResources, StoreError> {
        let mut current = self.get(faction_id).await?.unwrap_or_else(|| FactionResources {
            faction_id: faction_id.to_string(),
            ..FactionResources::default()
        });
        current.resources.insert(resource.to_string(), amount);
        self.upsert(&current).await?;
        Ok(current)
    }
}
