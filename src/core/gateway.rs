//! Outbound platform calls that are not tied to an interaction

use anyhow::Result;
use async_trait::async_trait;

use super::message::OutgoingMessage;

/// Channel posts and bot profile changes
///
/// Used by commands that post to a channel rather than replying, and by the
/// event listener. The serenity implementation lives in `discord::gateway`.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn send_message(&self, channel_id: &str, message: &OutgoingMessage) -> Result<()>;
    async fn set_username(&self, username: &str) -> Result<()>;
}
