//! Serenity-backed outbound gateway

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use log::info;
use serde_json::{Map, Value};
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;

use super::responder::fill_components;
use crate::core::{Gateway, OutgoingMessage};

/// Posts through the bot's REST client; usable before the gateway connects
pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Gateway for SerenityGateway {
    async fn send_message(&self, channel_id: &str, message: &OutgoingMessage) -> Result<()> {
        let channel = parse_channel_id(channel_id)?;
        channel
            .send_message(&self.http, |create| {
                create
                    .content(&message.content)
                    .components(|components| fill_components(components, &message.components))
            })
            .await?;
        Ok(())
    }

    async fn set_username(&self, username: &str) -> Result<()> {
        let mut profile = Map::new();
        profile.insert("username".to_string(), Value::String(username.to_string()));
        let user = self.http.edit_profile(&profile).await?;
        info!("Bot profile updated, now {}", user.name);
        Ok(())
    }
}

fn parse_channel_id(channel_id: &str) -> Result<ChannelId> {
    channel_id
        .parse::<u64>()
        .map(ChannelId)
        .with_context(|| format!("`{channel_id}` is not a Discord channel id"))
}
