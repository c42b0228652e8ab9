//! Guild configuration documents (`bot_data`)

use std::sync::Arc;

use super::models::BotDataDocument;
use super::store::{Collection, DocumentStore, Filter, StoreError, UpsertOutcome};
use super::{from_document, to_document};

const COLLECTION: Collection = Collection::BotData;

#[derive(Clone)]
pub struct BotDataRepository {
    store: Arc<dyn DocumentStore>,
}

impl BotDataRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn key(guild_id: &str) -> Filter {
        Filter::new().eq("discord_guild_id", guild_id)
    }

    pub async fn find_by_id(&self, guild_id: &str) -> Result<Option<BotDataDocument>, StoreError> {
        self.store
            .find_one(COLLECTION, &Self::key(guild_id))
            .await?
            .map(|document| from_document(COLLECTION, document))
            .transpose()
    }

    /// Upsert the document for its guild; channels left unset keep their stored value
    pub async fn create(&self, document: &BotDataDocument) -> Result<UpsertOutcome, StoreError> {
        let set = to_document(COLLECTION, document)?;
        self.store
            .upsert(COLLECTION, &Self::key(&document.discord_guild_id), set)
            .await
    }

    pub async fn update(&self, document: &BotDataDocument) -> Result<UpsertOutcome, StoreError> {
        self.create(document).await
    }

    pub async fn delete(&self, guild_id: &str) -> Result<bool, StoreError> {
        self.store.delete_one(COLLECTION, &Self::key(guild_id)).await
    }
}
