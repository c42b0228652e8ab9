//! Faction goals (`faction_goals`), keyed by faction and goal name

use serde_json::Value;
use std::sync::Arc;

use super::models::FactionGoal;
use super::store::{Collection, DocumentStore, Filter, StoreError, UpsertOutcome};
use super::{from_document, to_document};

const COLLECTION: Collection = Collection::FactionGoals;

#[derive(Clone)]
pub struct FactionGoalsRepository {
    store: Arc<dyn DocumentStore>,
}

impl FactionGoalsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn key(faction_id: &str, goal_name: &str) -> Filter {
        Filter::new()
            .eq("faction_id", faction_id)
            .eq("goal_name", goal_name)
    }

    pub async fn get(
        &self,
        faction_id: &str,
        goal_name: &str,
    ) -> Result<Option<FactionGoal>, StoreError> {
        self.store
            .find_one(COLLECTION, &Self::key(faction_id, goal_name))
            .await?
            .map(|document| from_document(COLLECTION, document))
            .transpose()
    }

    pub async fn list(&self, faction_id: &str) -> Result<Vec<FactionGoal>, StoreError> {
        self.store
            .find(COLLECTION, &Filter::new().eq("faction_id", faction_id))
            .await?
            .into_iter()
            .map(|document| from_document(COLLECTION, document))
            .collect()
    }

    pub async fn create(&self, goal: &FactionGoal) -> Result<UpsertOutcome, StoreError> {
        let set = to_document(COLLECTION, goal)?;
        self.store
            .upsert(COLLECTION, &Self::key(&goal.faction_id, &goal.goal_name), set)
            .await
    }

    /// Overwrites status and description; a `None` description clears the stored one
    pub async fn update(&self, goal: &FactionGoal) -> Result<UpsertOutcome, StoreError> {
        let mut set = to_document(COLLECTION, goal)?;
        set.entry("description").or_insert(Value::Null);
        self.store
            .upsert(COLLECTION, &Self::key(&goal.faction_id, &goal.goal_name), set)
            .await
    }

    pub async fn delete(&self, faction_id: &str, goal_name: &str) -> Result<bool, StoreError> {
        self.store
            .delete_one(COLLECTION, &Self::key(faction_id, goal_name))
            .await
    }
}
