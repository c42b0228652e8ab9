//! SQLite-backed document store
//!
//! Documents are stored as JSON text in a single `documents` table keyed by
//! collection name. Filtering happens on the decoded documents, which is fine
//! for the handful of records a faction keeps.
//!
//! Connections are pooled: `min_pool_size` are opened up front, more are
//! opened on demand while every existing one is busy, up to `max_pool_size`.
//! Writes run inside `BEGIN IMMEDIATE` so an upsert's read and write happen
//! under one database lock even across connections. Every driver call runs on
//! the blocking thread pool, so lock waits never stall the async workers.

use async_trait::async_trait;
use log::{debug, info};
use sqlite::{Connection, State};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use super::store::{
    apply_set, Collection, Document, DocumentStore, Filter, StoreError, UpsertOutcome,
};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS documents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        collection TEXT NOT NULL,
        body TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents (collection);
";

const BUSY_TIMEOUT_MS: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    File(PathBuf),
    Memory,
}

type PooledConnection = Arc<Mutex<Connection>>;

pub struct SqliteDocumentStore {
    pool: Arc<ConnectionPool>,
}

struct ConnectionPool {
    target: Target,
    connections: RwLock<Vec<PooledConnection>>,
    max_connections: usize,
    next: AtomicUsize,
}

/// Run a synchronous driver call on the blocking thread pool
async fn run_blocking<F, T>(f: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

impl SqliteDocumentStore {
    /// Open a store in `directory`, using `<directory>/<name>.sqlite3`
    pub fn open(
        directory: impl AsRef<Path>,
        name: &str,
        min_pool_size: usize,
        max_pool_size: usize,
    ) -> Result<Self, StoreError> {
        let directory = directory.as_ref();
        if !directory.as_os_str().is_empty() {
            std::fs::create_dir_all(directory)?;
        }
        let path = directory.join(format!("{name}.sqlite3"));
        info!("Opening SQLite document store at {}", path.display());
        Self::with_target(Target::File(path), min_pool_size, max_pool_size)
    }

    /// Private in-memory database; limited to one connection so all calls share it
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_target(Target::Memory, 1, 1)
    }

    fn with_target(
        target: Target,
        min_pool_size: usize,
        max_pool_size: usize,
    ) -> Result<Self, StoreError> {
        let max_connections = max_pool_size.max(1);
        let initial = min_pool_size.clamp(1, max_connections);

        let mut connections = Vec::with_capacity(max_connections);
        for _ in 0..initial {
            connections.push(Arc::new(Mutex::new(open_connection(&target)?)));
        }

        Ok(Self {
            pool: Arc::new(ConnectionPool {
                target,
                connections: RwLock::new(connections),
                max_connections,
                next: AtomicUsize::new(0),
            }),
        })
    }

    /// Number of connections opened so far
    pub fn open_connections(&self) -> usize {
        self.pool
            .connections
            .read()
            .map(|connections| connections.len())
            .unwrap_or(0)
    }
}

impl ConnectionPool {
    fn acquire(&self) -> Result<PooledConnection, StoreError> {
        {
            let connections = self.connections.read().map_err(|_| StoreError::Poisoned)?;
            for connection in connections.iter() {
                if connection.try_lock().is_ok() {
                    return Ok(Arc::clone(connection));
                }
            }
        }

        let mut connections = self.connections.write().map_err(|_| StoreError::Poisoned)?;
        if connections.len() < self.max_connections {
            debug!("Growing SQLite pool to {} connections", connections.len() + 1);
            let connection = Arc::new(Mutex::new(open_connection(&self.target)?));
            connections.push(Arc::clone(&connection));
            return Ok(connection);
        }

        let index = self.next.fetch_add(1, Ordering::Relaxed) % connections.len();
        Ok(Arc::clone(&connections[index]))
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let pooled = self.acquire()?;
        let connection = pooled.lock().map_err(|_| StoreError::Poisoned)?;
        f(&connection)
    }

    fn find_sync(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        self.with_connection(|connection| {
            Ok(load_collection(connection, collection)?
                .into_iter()
                .filter(|(_, document)| filter.matches(document))
                .map(|(_, document)| document)
                .collect())
        })
    }

    fn upsert_sync(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        self.with_connection(|connection| {
            in_transaction(connection, |connection| {
                let existing = load_collection(connection, collection)?
                    .into_iter()
                    .find(|(_, document)| filter.matches(document));

                match existing {
                    Some((id, mut document)) => {
                        apply_set(&mut document, &set);
                        let body = encode(collection, &document)?;
                        let mut statement =
                            connection.prepare("UPDATE documents SET body = ? WHERE id = ?")?;
                        statement.bind((1, body.as_str()))?;
                        statement.bind((2, id))?;
                        while statement.next()? != State::Done {}
                        Ok(UpsertOutcome {
                            matched: true,
                            inserted: false,
                        })
                    }
                    None => {
                        let mut document = filter.seed_document();
                        apply_set(&mut document, &set);
                        let body = encode(collection, &document)?;
                        let mut statement = connection
                            .prepare("INSERT INTO documents (collection, body) VALUES (?, ?)")?;
                        statement.bind((1, collection.as_str()))?;
                        statement.bind((2, body.as_str()))?;
                        while statement.next()? != State::Done {}
                        Ok(UpsertOutcome {
                            matched: false,
                            inserted: true,
                        })
                    }
                }
            })
        })
    }

    fn delete_sync(&self, collection: Collection, filter: &Filter) -> Result<bool, StoreError> {
        self.with_connection(|connection| {
            in_transaction(connection, |connection| {
                let existing = load_collection(connection, collection)?
                    .into_iter()
                    .find(|(_, document)| filter.matches(document));

                let Some((id, _)) = existing else {
                    return Ok(false);
                };
                let mut statement = connection.prepare("DELETE FROM documents WHERE id = ?")?;
                statement.bind((1, id))?;
                while statement.next()? != State::Done {}
                Ok(true)
            })
        })
    }
}

fn open_connection(target: &Target) -> Result<Connection, StoreError> {
    let connection = match target {
        Target::File(path) => sqlite::open(path)?,
        Target::Memory => sqlite::open(":memory:")?,
    };
    connection.execute(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))?;
    connection.execute(SCHEMA)?;
    Ok(connection)
}

fn in_transaction<T>(
    connection: &Connection,
    f: impl FnOnce(&Connection) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    connection.execute("BEGIN IMMEDIATE;")?;
    match f(connection) {
        Ok(value) => {
            connection.execute("COMMIT;")?;
            Ok(value)
        }
        Err(e) => {
            // The original error is more useful than a failed rollback
            let _ = connection.execute("ROLLBACK;");
            Err(e)
        }
    }
}

fn load_collection(
    connection: &Connection,
    collection: Collection,
) -> Result<Vec<(i64, Document)>, StoreError> {
    let mut statement =
        connection.prepare("SELECT id, body FROM documents WHERE collection = ? ORDER BY id")?;
    statement.bind((1, collection.as_str()))?;

    let mut rows = Vec::new();
    while let State::Row = statement.next()? {
        let id = statement.read::<i64, _>("id")?;
        let body = statement.read::<String, _>("body")?;
        let document = serde_json::from_str::<Document>(&body)
            .map_err(|source| StoreError::Deserialization { collection, source })?;
        rows.push((id, document));
    }
    Ok(rows)
}

fn encode(collection: Collection, document: &Document) -> Result<String, StoreError> {
    serde_json::to_string(document)
        .map_err(|source| StoreError::Serialization { collection, source })
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let pool = Arc::clone(&self.pool);
        let filter = filter.clone();
        run_blocking(move || pool.find_sync(collection, &filter)).await
    }

    async fn upsert(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        let pool = Arc::clone(&self.pool);
        let filter = filter.clone();
        run_blocking(move || pool.upsert_sync(collection, &filter, set)).await
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, StoreError> {
        let pool = Arc::clone(&self.pool);
        let filter = filter.clone();
        run_blocking(move || pool.delete_sync(collection, &filter)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_upsert_is_last_write_wins() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        let filter = Filter::new().eq("discord_guild_id", "123");

        store
            .upsert(Collection::BotData, &filter, doc(json!({ "discord_farming_channel_id": "1" })))
            .await
            .unwrap();
        let outcome = store
            .upsert(Collection::BotData, &filter, doc(json!({ "discord_farming_channel_id": "2" })))
            .await
            .unwrap();
        assert!(outcome.matched);

        let all = store.find(Collection::BotData, &Filter::new()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].get("discord_farming_channel_id"), Some(&json!("2")));
        assert_eq!(all[0].get("discord_guild_id"), Some(&json!("123")));
    }

    #[tokio::test]
    async fn test_delete_and_collection_scoping() {
        let store = SqliteDocumentStore::open_in_memory().unwrap();
        let filter = Filter::new().eq("faction_id", "kush").eq("goal_name", "Bushmaster");

        store
            .upsert(Collection::FactionGoals, &filter, doc(json!({ "status": "TBA" })))
            .await
            .unwrap();
        assert!(store
            .find_one(Collection::FactionResources, &filter)
            .await
            .unwrap()
            .is_none());

        assert!(store.delete_one(Collection::FactionGoals, &filter).await.unwrap());
        assert!(!store.delete_one(Collection::FactionGoals, &filter).await.unwrap());
        assert!(store
            .find_one(Collection::FactionGoals, &filter)
            .await
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_file_store_opens_min_pool() {
        let directory = std::env::temp_dir().join(format!("faction-bot-{}", uuid::Uuid::new_v4()));
        let store = SqliteDocumentStore::open(&directory, "pool_test", 2, 3).unwrap();
        assert_eq!(store.open_connections(), 2);
        assert!(directory.join("pool_test.sqlite3").exists());
        let _ = std::fs::remove_dir_all(&directory);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_locked_database_does_not_stall_runtime() {
        let directory = std::env::temp_dir().join(format!("faction-bot-{}", uuid::Uuid::new_v4()));
        let store = Arc::new(SqliteDocumentStore::open(&directory, "lock_test", 1, 1).unwrap());

        // A second connection holds the write lock
        let holder = sqlite::open(directory.join("lock_test.sqlite3")).unwrap();
        holder.execute("BEGIN IMMEDIATE;").unwrap();

        let writer = Arc::clone(&store);
        let pending = tokio::spawn(async move {
            let filter = Filter::new().eq("discord_guild_id", "123");
            let set = doc(json!({ "discord_farming_channel_id": "1" }));
            writer.upsert(Collection::BotData, &filter, set).await
        });

        // The single runtime thread keeps making progress while the write waits
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        assert!(!pending.is_finished());

        holder.execute("COMMIT;").unwrap();
        let outcome = pending.await.unwrap().unwrap();
        assert!(outcome.inserted);
        assert_eq!(store.find(Collection::BotData, &Filter::new()).await.unwrap().len(), 1);

        drop(holder);
        let _ = std::fs::remove_dir_all(&directory);
    }
}
