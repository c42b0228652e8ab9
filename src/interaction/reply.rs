//! Reply-state discipline
//!
//! Every interaction is answered through an [`InteractionReply`], which wraps
//! the platform transport and tracks whether an initial response has gone
//! out. The initial response (reply, defer, modal, or message update) can be
//! sent once; after a reply or defer only follow-ups and edits are accepted.
//! The state only advances when the transport call succeeds.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;

use crate::core::{BotError, Modal, OutgoingMessage};

/// Transport operations on a single interaction
///
/// Implemented by the serenity adapter for live traffic and by recording
/// fakes in tests. Implementations do not track state themselves.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    async fn reply(&self, message: &OutgoingMessage) -> Result<()>;
    async fn defer(&self, ephemeral: bool) -> Result<()>;
    async fn follow_up(&self, message: &OutgoingMessage) -> Result<()>;
    async fn edit_reply(&self, content: &str) -> Result<()>;
    async fn show_modal(&self, modal: &Modal) -> Result<()>;
    /// Edit the message a component is attached to, as the initial response
    async fn update_message(&self, content: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    Unanswered,
    Replied,
    Deferred,
    /// A form was shown; the triggering interaction accepts nothing further
    ModalShown,
}

/// Terminal response produced by a pattern handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Message(OutgoingMessage),
    Modal(Modal),
    UpdateMessage(String),
}

pub struct InteractionReply {
    responder: Box<dyn InteractionResponder>,
    state: ReplyState,
}

impl InteractionReply {
    pub fn new(responder: Box<dyn InteractionResponder>) -> Self {
        Self {
            responder,
            state: ReplyState::Unanswered,
        }
    }

    pub fn state(&self) -> ReplyState {
        self.state
    }

    /// True once a reply or defer has been sent and follow-ups are required
    pub fn is_replied_or_deferred(&self) -> bool {
        matches!(self.state, ReplyState::Replied | ReplyState::Deferred)
    }

    fn require_unanswered(&self) -> Result<()> {
        if self.state == ReplyState::Unanswered {
            Ok(())
        } else {
            Err(BotError::AlreadyResponded.into())
        }
    }

    pub async fn reply(&mut self, message: OutgoingMessage) -> Result<()> {
        self.require_unanswered()?;
        self.responder.reply(&message).await?;
        self.state = ReplyState::Replied;
        Ok(())
    }

    pub async fn defer(&mut self, ephemeral: bool) -> Result<()> {
        self.require_unanswered()?;
        self.responder.defer(ephemeral).await?;
        self.state = ReplyState::Deferred;
        Ok(())
    }

    pub async fn follow_up(&mut self, message: OutgoingMessage) -> Result<()> {
        if !self.is_replied_or_deferred() {
            return Err(BotError::NotResponded.into());
        }
        self.responder.follow_up(&message).await
    }

    /// Edit the initial reply, or fill in a deferred one
    pub async fn edit_reply(&mut self, content: &str) -> Result<()> {
        if !self.is_replied_or_deferred() {
            return Err(BotError::NotResponded.into());
        }
        self.responder.edit_reply(content).await?;
        self.state = ReplyState::Replied;
        Ok(())
    }

    pub async fn show_modal(&mut self, modal: Modal) -> Result<()> {
        self.require_unanswered()?;
        self.responder.show_modal(&modal).await?;
        self.state = ReplyState::ModalShown;
        Ok(())
    }

    pub async fn update_message(&mut self, content: String) -> Result<()> {
        self.require_unanswered()?;
        self.responder.update_message(&content).await?;
        self.state = ReplyState::Replied;
        Ok(())
    }

    /// Send a pattern handler's terminal response
    pub async fn respond(&mut self, response: Response) -> Result<()> {
        match response {
            Response::Message(message) => self.reply(message).await,
            Response::Modal(modal) => self.show_modal(modal).await,
            Response::UpdateMessage(content) => self.update_message(content).await,
        }
    }
}
