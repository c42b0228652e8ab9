//! In-memory document store
//!
//! Collections live in a DashMap; the entry guard for a collection is held for
//! the whole of an upsert or delete, so each write is atomic per collection.

use async_trait::async_trait;
use dashmap::DashMap;

use super::store::{
    apply_set, Collection, Document, DocumentStore, Filter, StoreError, UpsertOutcome,
};

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<Collection, Vec<Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently stored in a collection
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .get(&collection)
            .map(|documents| documents.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collections.get(&collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| filter.matches(document))
                .cloned()
        }))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn upsert(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut documents = self.collections.entry(collection).or_default();

        if let Some(existing) = documents.iter_mut().find(|document| filter.matches(document)) {
            apply_set(existing, &set);
            return Ok(UpsertOutcome {
                matched: true,
                inserted: false,
            });
        }

        let mut document = filter.seed_document();
        apply_set(&mut document, &set);
        documents.push(document);
        Ok(UpsertOutcome {
            matched: false,
            inserted: true,
        })
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, StoreError> {
        let Some(mut documents) = self.collections.get_mut(&collection) else {
            return Ok(false);
        };
        match documents.iter().position(|document| filter.matches(document)) {
            Some(index) => {
                documents.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
