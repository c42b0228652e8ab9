//! # Event Bus
//!
//! Commands that post to a channel on the user's behalf publish an event
//! here instead of doing the work inside the interaction. A single
//! [`EventListener`] task consumes the events and posts through the gateway.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Faction goals and bot channel data events

use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::core::{ActionRow, ButtonStyle, Gateway, OutgoingMessage};
use crate::database::{BotDataDocument, FactionGoal, Repository};

/// Broadcast channel capacity for bot events
const EVENT_CHANNEL_CAPACITY: usize = 64;

pub const NO_GOALS_MESSAGE: &str =
    "There are no faction goals yet. Use /create-faction-goal to add one.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    ShowFactionGoals {
        channel_id: String,
        faction_id: String,
    },
    ShowBotChannelData {
        channel_id: String,
        guild_id: String,
    },
}

/// Process-lifetime event bus, created once at startup and shared by handle
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BotEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BotEvent> {
        self.sender.subscribe()
    }

    /// Publish an event; returns false when nothing is listening
    pub fn publish(&self, event: BotEvent) -> bool {
        match self.sender.send(event) {
            Ok(receivers) => {
                debug!("Published bot event to {receivers} listener(s)");
                true
            }
            Err(broadcast::error::SendError(event)) => {
                warn!("No listener for bot event {event:?}");
                false
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EventListener {
    repository: Repository,
    gateway: Arc<dyn Gateway>,
}

impl EventListener {
    pub fn new(repository: Repository, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// Consume events until every sender is dropped
    pub async fn run(self, mut receiver: broadcast::Receiver<BotEvent>) {
        info!("🛰️ Event listener started");
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.handle(&event).await {
                        error!("Failed to handle bot event {event:?}: {e}");
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Event listener lagged behind by {n} events");
                }
            }
        }
        info!("Event listener stopped");
    }

    pub async fn handle(&self, event: &BotEvent) -> Result<()> {
        match event {
            BotEvent::ShowFactionGoals {
                channel_id,
                faction_id,
            } => self.show_faction_goals(channel_id, faction_id).await,
            BotEvent::ShowBotChannelData {
                channel_id,
                guild_id,
            } => self.show_bot_channel_data(channel_id, guild_id).await,
        }
    }

    async fn show_faction_goals(&self, channel_id: &str, faction_id: &str) -> Result<()> {
        let goals = self.repository.goals.list(faction_id).await?;
        if goals.is_empty() {
            self.gateway
                .send_message(
                    channel_id,
                    &OutgoingMessage::public(NO_GOALS_MESSAGE),
                )
                .await?;
            return Ok(());
        }

        for goal in &goals {
            self.gateway.send_message(channel_id, &goal_post(goal)).await?;
        }
        info!("Posted {} faction goals to channel {channel_id}", goals.len());
        Ok(())
    }

    async fn show_bot_channel_data(&self, channel_id: &str, guild_id: &str) -> Result<()> {
        let document = self.repository.bot_data.find_by_id(guild_id).await?;
        let message = bot_data_post(guild_id, document.as_ref());
        self.gateway.send_message(channel_id, &message).await
    }
}

/// One goal with its update and delete buttons
pub fn goal_post(goal: &FactionGoal) -> OutgoingMessage {
    let content = format!(
        "**{}**\n{}\nStatus: {}",
        goal.goal_name,
        goal.description_or_default(),
        goal.status
    );
    OutgoingMessage::public(content).with_row(
        ActionRow::button(
            format!("update_goal_{}", goal.goal_name),
            "Update goal",
            ButtonStyle::Primary,
        )
        .with_button(
            format!("delete_goal_{}", goal.goal_name),
            "Delete goal",
            ButtonStyle::Danger,
        ),
    )
}

/// The guild's channel configuration with an edit button
pub fn bot_data_post(guild_id: &str, document: Option<&BotDataDocument>) -> OutgoingMessage {
    let content = match document {
        None => "No bot channel data has been saved for this server yet.".to_string(),
        Some(document) => {
            let mut content = String::from("**Bot channel data**\n");
            for (label, channel) in document.channels() {
                let shown = channel
                    .map(|id| format!("<#{id}>"))
                    .unwrap_or_else(|| "Not set".to_string());
                content.push_str(&format!("{label}: {shown}\n"));
            }
            content
        }
    };
    OutgoingMessage::public(content).with_row(ActionRow::button(
        format!("update_bot_data_{guild_id}"),
        "Update bot data",
        ButtonStyle::Primary,
    ))
}
