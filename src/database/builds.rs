//! Saved character builds (`faction_builds`), one per member per faction

use std::sync::Arc;

use super::models::FactionBuild;
use super::store::{Collection, DocumentStore, Filter, StoreError, UpsertOutcome};
use super::{from_document, to_document};

const COLLECTION: Collection = Collection::FactionBuilds;

#[derive(Clone)]
pub struct FactionBuildsRepository {
    store: Arc<dyn DocumentStore>,
}

impl FactionBuildsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn upsert(&self, build: &FactionBuild) -> Result<UpsertOutcome, StoreError> {
        let key = Filter::new()
            .eq("faction_id", build.faction_id.as_str())
            .eq("discord_user_id", build.discord_user_id.as_str());
        let set = to_document(COLLECTION, build)?;
        self.store.upsert(COLLECTION, &key, set).await
    }

    pub async fn list(&self, faction_id: &str) -> Result<Vec<FactionBuild>, StoreError> {
        self.store
            .find(COLLECTION, &Filter::new().eq("faction_id", faction_id))
            .await?
            .into_iter()
            .map(|document| from_document(COLLECTION, document))
            .collect()
    }
}
