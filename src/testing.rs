//! Test doubles for the transport, gateway and store seams

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::commands::context::CommandContext;
use crate::core::{Gateway, Modal, OutgoingMessage};
use crate::database::{
    Collection, Document, DocumentStore, Filter, MemoryDocumentStore, Repository, StoreError,
    UpsertOutcome,
};
use crate::features::{EventBus, MapCatalog, MapEntry};
use crate::interaction::{InteractionReply, InteractionResponder, Invoker};

pub const FACTION_ID: &str = "kush";
pub const GUILD_ID: &str = "123";
pub const CHANNEL_ID: &str = "900";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Reply(OutgoingMessage),
    Defer { ephemeral: bool },
    FollowUp(OutgoingMessage),
    EditReply(String),
    Modal(Modal),
    UpdateMessage(String),
}

#[derive(Clone, Default)]
pub struct SentLog(Arc<Mutex<Vec<Sent>>>);

impl SentLog {
    pub fn sent(&self) -> Vec<Sent> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, sent: Sent) {
        self.0.lock().unwrap().push(sent);
    }
}

/// Records every transport call; a failing responder records nothing
pub struct RecordingResponder {
    log: SentLog,
    fail: bool,
}

impl RecordingResponder {
    pub fn new() -> (Self, SentLog) {
        let log = SentLog::default();
        (
            Self {
                log: log.clone(),
                fail: false,
            },
            log,
        )
    }

    pub fn failing() -> (Self, SentLog) {
        let (mut responder, log) = Self::new();
        responder.fail = true;
        (responder, log)
    }

    fn record(&self, sent: Sent) -> Result<()> {
        if self.fail {
            bail!("transport unavailable");
        }
        self.log.push(sent);
        Ok(())
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn reply(&self, message: &OutgoingMessage) -> Result<()> {
        self.record(Sent::Reply(message.clone()))
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.record(Sent::Defer { ephemeral })
    }

    async fn follow_up(&self, message: &OutgoingMessage) -> Result<()> {
        self.record(Sent::FollowUp(message.clone()))
    }

    async fn edit_reply(&self, content: &str) -> Result<()> {
        self.record(Sent::EditReply(content.to_string()))
    }

    async fn show_modal(&self, modal: &Modal) -> Result<()> {
        self.record(Sent::Modal(modal.clone()))
    }

    async fn update_message(&self, content: &str) -> Result<()> {
        self.record(Sent::UpdateMessage(content.to_string()))
    }
}

pub fn recording_reply() -> (InteractionReply, SentLog) {
    let (responder, log) = RecordingResponder::new();
    (InteractionReply::new(Box::new(responder)), log)
}

#[derive(Clone, Default)]
pub struct GatewayLog {
    messages: Arc<Mutex<Vec<(String, OutgoingMessage)>>>,
    usernames: Arc<Mutex<Vec<String>>>,
}

impl GatewayLog {
    pub fn messages(&self) -> Vec<(String, OutgoingMessage)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn usernames(&self) -> Vec<String> {
        self.usernames.lock().unwrap().clone()
    }
}

pub struct RecordingGateway {
    log: GatewayLog,
}

impl RecordingGateway {
    pub fn new() -> (Self, GatewayLog) {
        let log = GatewayLog::default();
        (Self { log: log.clone() }, log)
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn send_message(&self, channel_id: &str, message: &OutgoingMessage) -> Result<()> {
        self.log
            .messages
            .lock()
            .unwrap()
            .push((channel_id.to_string(), message.clone()));
        Ok(())
    }

    async fn set_username(&self, username: &str) -> Result<()> {
        self.log.usernames.lock().unwrap().push(username.to_string());
        Ok(())
    }
}

/// Memory store that remembers which filters were upserted and deleted
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryDocumentStore,
    upserts: Mutex<Vec<(Collection, Filter)>>,
    deletes: Mutex<Vec<(Collection, Filter)>>,
}

impl CountingStore {
    pub fn upserts(&self) -> Vec<(Collection, Filter)> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<(Collection, Filter)> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        self.upserts().len() + self.deletes().len()
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.inner.find_one(collection, filter).await
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.find(collection, filter).await
    }

    async fn upsert(
        &self,
        collection: Collection,
        filter: &Filter,
        set: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        self.upserts.lock().unwrap().push((collection, filter.clone()));
        self.inner.upsert(collection, filter, set).await
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, StoreError> {
        self.deletes.lock().unwrap().push((collection, filter.clone()));
        self.inner.delete_one(collection, filter).await
    }
}

pub fn sample_maps() -> Vec<MapEntry> {
    ["Muldraugh", "West Point", "Riverside"]
        .iter()
        .enumerate()
        .map(|(index, label)| MapEntry {
            id: (index + 1).to_string(),
            label: label.to_string(),
            description: format!("{label}, Kentucky"),
            url: format!("https://pzfans.com/maps/{}", index + 1),
        })
        .collect()
}

pub struct Harness {
    pub context: CommandContext,
    pub store: Arc<CountingStore>,
    pub gateway: GatewayLog,
}

/// Command context over a counting memory store, recording gateway and three maps
pub fn harness() -> Harness {
    let store = Arc::new(CountingStore::default());
    let (gateway, gateway_log) = RecordingGateway::new();
    let context = CommandContext::new(
        Repository::new(store.clone()),
        EventBus::new(),
        MapCatalog::inline(sample_maps()),
        Arc::new(gateway),
        FACTION_ID,
    );
    Harness {
        context,
        store,
        gateway: gateway_log,
    }
}

pub fn invoker(roles: &[&str]) -> Invoker {
    Invoker {
        user_id: "42".to_string(),
        username: "tester".to_string(),
        guild_id: Some(GUILD_ID.to_string()),
        channel_id: CHANNEL_ID.to_string(),
        roles: roles.iter().map(|role| role.to_string()).collect(),
    }
}
